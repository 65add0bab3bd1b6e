//! Confirmation gate for destructive admin actions.
//!
//! # Design
//! - One shared dialog resource per screen, acquired lazily after the
//!   first render settles; until it is ready the gate degrades to the
//!   browser's blocking confirm prompt.
//! - Acquisition polls at a fixed interval bounded by a timeout; after
//!   the timeout the gate stays in fallback mode for the session.
//! - Binding a new approval callback replaces the previous one, so a
//!   cancelled confirmation can never fire a stale handler later.

/// Delay before the first acquisition attempt, letting the dialog's
/// backing DOM node exist.
pub const SETTLE_DELAY_MS: u32 = 150;

/// Interval between acquisition attempts.
pub const POLL_INTERVAL_MS: u32 = 250;

/// Total budget for acquisition polling.
pub const POLL_TIMEOUT_MS: u32 = 5_000;

/// Readiness of the shared dialog resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateStatus {
    /// Acquisition has not finished; confirmations use the fallback.
    Pending,
    /// The rich dialog is available.
    Ready,
    /// Acquisition failed or timed out; fallback for the rest of the
    /// session.
    Fallback,
}

/// Decision for one acquisition poll tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollStep {
    /// Try again at the next interval.
    Retry,
    /// Budget exhausted; settle into fallback mode.
    GiveUp,
}

/// Decide whether the `attempt`-th poll (zero-based) may still run.
#[must_use]
pub const fn next_poll_step(attempt: u32) -> PollStep {
    if attempt.saturating_mul(POLL_INTERVAL_MS) >= POLL_TIMEOUT_MS {
        PollStep::GiveUp
    } else {
        PollStep::Retry
    }
}

/// Single pending-approval slot shared by the gate's confirmations.
///
/// Binding replaces whatever handler was pending, dismissal drops it
/// without invoking it, and taking consumes it at most once, so a
/// cancelled confirmation can never fire a stale handler later.
#[derive(Debug)]
pub struct ApprovalSlot<T> {
    pending: Option<T>,
}

impl<T> ApprovalSlot<T> {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Bind a handler, detaching any previously bound one.
    pub fn bind(&mut self, handler: T) {
        self.pending = Some(handler);
    }

    /// Drop the pending handler without invoking it.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// Consume the pending handler, if any.
    pub const fn take(&mut self) -> Option<T> {
        self.pending.take()
    }
}

impl<T> Default for ApprovalSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use wasm::ConfirmGate;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use gloo::console;
    use web_sys::HtmlDialogElement;
    use yew::{Callback, NodeRef};

    use super::{ApprovalSlot, GateStatus};

    /// Owner of the shared dialog resource and the pending approval.
    pub(crate) struct ConfirmGate {
        status: GateStatus,
        dialog: Option<HtmlDialogElement>,
        pending: ApprovalSlot<Callback<()>>,
        set_message: Callback<String>,
    }

    impl ConfirmGate {
        /// A gate that has not yet acquired its dialog.
        pub(crate) const fn new(set_message: Callback<String>) -> Self {
            Self {
                status: GateStatus::Pending,
                dialog: None,
                pending: ApprovalSlot::new(),
                set_message,
            }
        }

        /// Try to acquire the dialog element behind `node`.
        ///
        /// Returns `true` once the gate is ready. A node that exists but
        /// is not a `<dialog>` counts as a construction failure and
        /// settles the gate into fallback mode.
        pub(crate) fn attach(&mut self, node: &NodeRef) -> bool {
            if node.get().is_none() {
                return false;
            }
            match node.cast::<HtmlDialogElement>() {
                Some(dialog) => {
                    self.dialog = Some(dialog);
                    self.status = GateStatus::Ready;
                    true
                }
                None => {
                    console::warn!("confirm dialog node is not a <dialog>; using fallback prompts");
                    self.status = GateStatus::Fallback;
                    true
                }
            }
        }

        /// Give up on acquisition for this session.
        pub(crate) fn mark_fallback(&mut self) {
            console::warn!("confirm dialog unavailable after polling; using fallback prompts");
            self.status = GateStatus::Fallback;
        }

        /// Gate `on_approve` behind an explicit user confirmation.
        ///
        /// With the rich dialog ready this rebinds the pending approval
        /// (detaching any stale one) and shows the dialog; otherwise a
        /// blocking prompt decides immediately.
        pub(crate) fn confirm(&mut self, message: &str, on_approve: Callback<()>) {
            if self.status == GateStatus::Ready {
                if let Some(dialog) = self.dialog.clone() {
                    self.set_message.emit(message.to_string());
                    self.pending.bind(on_approve.clone());
                    if dialog.show_modal().is_ok() {
                        return;
                    }
                    // show_modal unsupported: drop the binding and fall
                    // through to the blocking prompt.
                    self.pending.dismiss();
                    self.mark_fallback();
                }
            }
            if gloo::dialogs::confirm(message) {
                on_approve.emit(());
            }
        }

        /// The dialog's continue control was pressed: hide the dialog
        /// and hand the pending approval back to the caller, who emits
        /// it outside any borrow of the gate.
        pub(crate) fn take_approval(&mut self) -> Option<Callback<()>> {
            let pending = self.pending.take();
            self.hide();
            pending
        }

        /// The dialog was dismissed without approval.
        pub(crate) fn dismiss(&mut self) {
            self.pending.dismiss();
            self.hide();
        }

        /// Release the dialog resource and any pending approval.
        pub(crate) fn teardown(&mut self) {
            self.dismiss();
            self.dialog = None;
            self.status = GateStatus::Fallback;
        }

        fn hide(&self) {
            if let Some(dialog) = &self.dialog {
                dialog.close();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_budget_allows_twenty_attempts() {
        assert_eq!(next_poll_step(0), PollStep::Retry);
        assert_eq!(next_poll_step(19), PollStep::Retry);
        assert_eq!(next_poll_step(20), PollStep::GiveUp);
        assert_eq!(next_poll_step(u32::MAX), PollStep::GiveUp);
    }

    #[test]
    fn budget_matches_the_advertised_timeout() {
        let mut attempts = 0u32;
        while next_poll_step(attempts) == PollStep::Retry {
            attempts += 1;
        }
        assert_eq!(attempts * POLL_INTERVAL_MS, POLL_TIMEOUT_MS);
    }

    #[test]
    fn rebinding_replaces_the_pending_handler() {
        let mut slot = ApprovalSlot::new();
        slot.bind("first");
        slot.bind("second");
        assert_eq!(slot.take(), Some("second"));
        assert_eq!(slot.take(), None, "an approval is consumed at most once");
    }

    #[test]
    fn confirming_again_after_a_cancellation_never_yields_the_old_handler() {
        let mut slot = ApprovalSlot::new();
        slot.bind("first");
        slot.dismiss();
        slot.bind("second");
        assert_eq!(slot.take(), Some("second"));
    }

    #[test]
    fn declining_leaves_nothing_to_invoke() {
        let mut slot = ApprovalSlot::new();
        slot.bind("queued");
        slot.dismiss();
        assert_eq!(slot.take(), None);
    }
}
