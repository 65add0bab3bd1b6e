use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ConfirmDialogProps {
    /// Ref the confirmation gate acquires the dialog element through.
    pub dialog_ref: NodeRef,
    pub message: AttrValue,
    pub on_continue: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Shared confirmation dialog; shown imperatively by the gate via
/// `show_modal`, so there is no `open` prop.
#[function_component(ConfirmDialog)]
pub(crate) fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_continue = {
        let on_continue = props.on_continue.clone();
        Callback::from(move |_| on_continue.emit(()))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    html! {
        <dialog ref={props.dialog_ref.clone()} class="modal">
            <div class="modal-box space-y-4">
                <p>{props.message.clone()}</p>
                <div class="flex justify-end gap-2">
                    <button class="btn btn-ghost btn-sm" onclick={on_cancel}>
                        {"Cancel"}
                    </button>
                    <button class="btn btn-primary btn-sm" onclick={on_continue}>
                        {"Continue"}
                    </button>
                </div>
            </div>
        </dialog>
    }
}
