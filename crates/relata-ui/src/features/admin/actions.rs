//! Admin feature actions.
//!
//! Every UI-visible transition of the Sync and Reset machines is one of
//! these; the reducer in [`crate::features::admin::state`] applies them.

/// Transitions applied to [`crate::features::admin::state::AdminState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminAction {
    /// The user approved the sync confirmation: clear the previous
    /// banner, show the hint, mark the action busy, show the bar at 0%.
    SyncApproved,
    /// A non-terminal progress event arrived on the channel.
    SyncProgress(u8),
    /// The channel completed at 100%.
    SyncCompleted,
    /// The trigger could not be dispatched or the channel failed.
    SyncFailed {
        /// Banner text explaining the failure.
        message: String,
    },
    /// The user approved the reset confirmation.
    ResetApproved,
    /// The awaited reset call returned success.
    ResetSucceeded,
    /// The awaited reset call failed; the action is re-enabled.
    ResetFailed,
}
