//! Orchestrating view for the Sync and Reset actions.
//!
//! # Design
//! - All state transitions go through the reducer in `state`; the view
//!   only decides *when* to dispatch.
//! - Re-entrancy is prevented by the disabled affordance: while a sync
//!   is confirming/triggering/streaming the button rejects clicks, so
//!   no extra guard flag is needed.
//! - Teardown closes the live stream, disposes the dialog resource and
//!   cancels timers on every exit path.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::timers::callback::Timeout;
use relata_api_models::PlanInfo;
use yew::prelude::*;

use crate::components::banner::Banner;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::progress::ProgressBar;
use crate::endpoints::{plans_url, sync_events_url};
use crate::features::admin::actions::AdminAction;
use crate::features::admin::api;
use crate::features::admin::state::{
    AdminState, RESET_CONFIRM_MESSAGE, RESET_FAILED_ALERT, RESET_RELOAD_DELAY_MS,
    SUCCESS_RELOAD_DELAY_MS, SYNC_CONFIRM_MESSAGE, SYNC_DISPATCH_FAILED_MESSAGE,
    SYNC_HINT, SYNC_STREAM_FAILED_MESSAGE,
};
use crate::services::confirm::{
    ConfirmGate, POLL_INTERVAL_MS, PollStep, SETTLE_DELAY_MS, next_poll_step,
};
use crate::services::transport::{StreamCallbacks, StreamHandle, connect_progress_stream};

type SharedGate = Rc<RefCell<Option<ConfirmGate>>>;
type TimerSlot = Rc<RefCell<Option<Timeout>>>;

#[derive(Default, PartialEq)]
struct AdminStore(AdminState);

impl Reducible for AdminStore {
    type Action = AdminAction;

    fn reduce(self: Rc<Self>, action: AdminAction) -> Rc<Self> {
        Rc::new(Self(self.0.apply(&action)))
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct AdminControlsProps {
    pub base_url: AttrValue,
    pub shop: AttrValue,
    pub plan: PlanInfo,
}

#[function_component(AdminControls)]
pub(crate) fn admin_controls(props: &AdminControlsProps) -> Html {
    let store = use_reducer(AdminStore::default);
    let dialog_ref = use_node_ref();
    let dialog_message = use_state(|| AttrValue::from(""));
    let gate: SharedGate = use_mut_ref(|| None);
    let stream = use_mut_ref(|| None::<StreamHandle>);
    let reload_timer: TimerSlot = use_mut_ref(|| None);

    {
        let gate = gate.clone();
        let dialog_ref = dialog_ref.clone();
        let dialog_message = dialog_message.clone();
        let stream = stream.clone();
        let reload_timer = reload_timer.clone();
        use_effect_with_deps(
            move |_| {
                let set_message =
                    Callback::from(move |message: String| dialog_message.set(message.into()));
                *gate.borrow_mut() = Some(ConfirmGate::new(set_message));

                let poll: TimerSlot = Rc::new(RefCell::new(None));
                let settle = {
                    let gate = gate.clone();
                    let poll = poll.clone();
                    let dialog_ref = dialog_ref.clone();
                    Timeout::new(SETTLE_DELAY_MS, move || {
                        if !try_attach(&gate, &dialog_ref) {
                            schedule_poll(gate, dialog_ref, poll, 0);
                        }
                    })
                };

                move || {
                    drop(settle);
                    poll.borrow_mut().take();
                    reload_timer.borrow_mut().take();
                    if let Some(handle) = stream.borrow_mut().take() {
                        handle.close();
                    }
                    if let Some(gate) = gate.borrow_mut().as_mut() {
                        gate.teardown();
                    }
                }
            },
            (),
        );
    }

    let on_sync_approved = {
        let store = store.clone();
        let stream = stream.clone();
        let reload_timer = reload_timer.clone();
        let base_url = props.base_url.clone();
        let shop = props.shop.clone();
        Callback::from(move |()| {
            store.dispatch(AdminAction::SyncApproved);

            // Fire-and-forget trigger; only a dispatch failure matters.
            {
                let store = store.clone();
                let stream = stream.clone();
                let base_url = base_url.clone();
                let shop = shop.clone();
                yew::platform::spawn_local(async move {
                    if let Err(err) = api::trigger_sync(&base_url, &shop).await {
                        console::error!(format!("sync trigger dispatch failed: {err}"));
                        if let Some(handle) = stream.borrow_mut().take() {
                            handle.close();
                        }
                        store.dispatch(AdminAction::SyncFailed {
                            message: SYNC_DISPATCH_FAILED_MESSAGE.to_string(),
                        });
                    }
                });
            }

            let callbacks = StreamCallbacks {
                on_progress: {
                    let store = store.clone();
                    Callback::from(move |percent| store.dispatch(AdminAction::SyncProgress(percent)))
                },
                on_complete: {
                    let store = store.clone();
                    let stream = stream.clone();
                    let reload_timer = reload_timer.clone();
                    Callback::from(move |()| {
                        stream.borrow_mut().take();
                        store.dispatch(AdminAction::SyncCompleted);
                        *reload_timer.borrow_mut() = Some(schedule_reload(SUCCESS_RELOAD_DELAY_MS));
                    })
                },
                on_error: {
                    let store = store.clone();
                    let stream = stream.clone();
                    Callback::from(move |()| {
                        stream.borrow_mut().take();
                        store.dispatch(AdminAction::SyncFailed {
                            message: SYNC_STREAM_FAILED_MESSAGE.to_string(),
                        });
                    })
                },
            };
            match connect_progress_stream(sync_events_url(&base_url, &shop), callbacks) {
                Some(handle) => *stream.borrow_mut() = Some(handle),
                // Without a connection no terminal signal can ever
                // arrive; settle the attempt as failed right away.
                None => store.dispatch(AdminAction::SyncFailed {
                    message: SYNC_STREAM_FAILED_MESSAGE.to_string(),
                }),
            }
        })
    };

    let on_reset_approved = {
        let store = store.clone();
        let reload_timer = reload_timer.clone();
        let base_url = props.base_url.clone();
        let shop = props.shop.clone();
        Callback::from(move |()| {
            store.dispatch(AdminAction::ResetApproved);
            let store = store.clone();
            let reload_timer = reload_timer.clone();
            let base_url = base_url.clone();
            let shop = shop.clone();
            yew::platform::spawn_local(async move {
                match api::trigger_reset(&base_url, &shop).await {
                    Ok(()) => {
                        store.dispatch(AdminAction::ResetSucceeded);
                        *reload_timer.borrow_mut() = Some(schedule_reload(RESET_RELOAD_DELAY_MS));
                    }
                    Err(err) => {
                        console::error!(format!("reset failed: {err}"));
                        store.dispatch(AdminAction::ResetFailed);
                        gloo::dialogs::alert(RESET_FAILED_ALERT);
                    }
                }
            });
        })
    };

    let on_sync = {
        let gate = gate.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(gate) = gate.borrow_mut().as_mut() {
                gate.confirm(SYNC_CONFIRM_MESSAGE, on_sync_approved.clone());
            }
        })
    };

    let on_reset = {
        let gate = gate.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(gate) = gate.borrow_mut().as_mut() {
                gate.confirm(RESET_CONFIRM_MESSAGE, on_reset_approved.clone());
            }
        })
    };

    let on_continue = {
        let gate = gate.clone();
        Callback::from(move |()| {
            let approval = gate
                .borrow_mut()
                .as_mut()
                .and_then(ConfirmGate::take_approval);
            if let Some(on_approve) = approval {
                on_approve.emit(());
            }
        })
    };

    let on_cancel = {
        let gate = gate.clone();
        Callback::from(move |()| {
            if let Some(gate) = gate.borrow_mut().as_mut() {
                gate.dismiss();
            }
        })
    };

    let state = &store.0;
    html! {
        <>
            <div class="flex items-center gap-2">
                {plan_link(&props.plan, &props.shop)}
                <button
                    class="btn btn-error"
                    onclick={on_reset}
                    disabled={state.reset.disabled}
                >
                    {spinner(state.reset.loading)}
                    {state.reset.label.clone()}
                </button>
                <button
                    class="btn btn-success"
                    onclick={on_sync}
                    disabled={state.sync.disabled}
                >
                    {spinner(state.sync.loading)}
                    {state.sync.label.clone()}
                </button>
            </div>
            {hint(state)}
            <ProgressBar progress={state.progress.clone()} />
            <Banner banner={state.banner.clone()} />
            <ConfirmDialog
                dialog_ref={dialog_ref}
                message={(*dialog_message).clone()}
                on_continue={on_continue}
                on_cancel={on_cancel}
            />
        </>
    }
}

fn plan_link(plan: &PlanInfo, shop: &str) -> Html {
    if !plan.upgradeable() {
        return html! {};
    }
    html! {
        <a class="btn btn-neutral" href={plans_url(shop)}>{"Explore Plans"}</a>
    }
}

fn spinner(loading: bool) -> Html {
    if loading {
        html! { <span class="loading loading-spinner loading-xs" /> }
    } else {
        html! {}
    }
}

fn hint(state: &AdminState) -> Html {
    if state.hint_visible {
        html! { <p class="text-sm text-base-content/70">{SYNC_HINT}</p> }
    } else {
        html! {}
    }
}

fn try_attach(gate: &SharedGate, node: &NodeRef) -> bool {
    gate.borrow_mut().as_mut().is_some_and(|gate| gate.attach(node))
}

/// Poll for the dialog node with chained timeouts; each fired timeout
/// schedules the next so cancellation is just dropping the slot.
fn schedule_poll(gate: SharedGate, node: NodeRef, slot: TimerSlot, attempt: u32) {
    let next = {
        let gate = gate.clone();
        let node = node.clone();
        let slot = slot.clone();
        Timeout::new(POLL_INTERVAL_MS, move || {
            if try_attach(&gate, &node) {
                return;
            }
            if next_poll_step(attempt + 1) == PollStep::GiveUp {
                if let Some(gate) = gate.borrow_mut().as_mut() {
                    gate.mark_fallback();
                }
                return;
            }
            schedule_poll(gate, node, slot, attempt + 1);
        })
    };
    *slot.borrow_mut() = Some(next);
}

fn schedule_reload(delay_ms: u32) -> Timeout {
    Timeout::new(delay_ms, || {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    })
}
