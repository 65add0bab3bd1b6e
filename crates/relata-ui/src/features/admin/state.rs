//! Admin screen state and its reducer.
//!
//! # Design
//! - Each action button owns its own state; Sync transitions never
//!   touch Reset and vice versa.
//! - The progress bar invariant `visible == false implies percent == 0`
//!   is enforced here, not at call sites.
//! - The banner is overwritten on every new attempt and cleared when a
//!   fresh sync starts.

use crate::features::admin::actions::AdminAction;

/// Idle label for the Sync action.
pub const SYNC_IDLE_LABEL: &str = "Sync Now";
/// Busy label for the Sync action.
pub const SYNC_BUSY_LABEL: &str = "Syncing...";
/// Idle label for the Reset action.
pub const RESET_IDLE_LABEL: &str = "Reset";
/// Busy label for the Reset action.
pub const RESET_BUSY_LABEL: &str = "Resetting...";
/// Label shown after a successful reset, while the reload is imminent.
pub const RESET_DONE_LABEL: &str = "Done!";

/// Confirmation prompt for the Sync action.
pub const SYNC_CONFIRM_MESSAGE: &str =
    "This will sync all parent and child collections for your shop. Continue?";
/// Confirmation prompt for the Reset action.
pub const RESET_CONFIRM_MESSAGE: &str = "Reset all parent/child relations?";

/// Banner text for a completed sync.
pub const SYNC_SUCCESS_MESSAGE: &str = "Collections synced. Reloading shortly...";
/// Banner text when the progress channel fails.
pub const SYNC_STREAM_FAILED_MESSAGE: &str = "Sync failed or connection lost.";
/// Banner text when the trigger call cannot be dispatched.
pub const SYNC_DISPATCH_FAILED_MESSAGE: &str = "Failed to start sync.";
/// Blocking alert when the awaited reset call fails.
pub const RESET_FAILED_ALERT: &str = "Reset failed. Please try again.";
/// Hint shown while a sync runs in the background.
pub const SYNC_HINT: &str = "Sync runs in the background. You can keep this page open.";

/// Delay before reloading after a successful sync, so the banner is
/// readable.
pub const SUCCESS_RELOAD_DELAY_MS: u32 = 6_000;
/// Delay before reloading after a successful reset.
pub const RESET_RELOAD_DELAY_MS: u32 = 1_000;

/// Presentation state of one action button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionState {
    /// Whether the control rejects clicks.
    pub disabled: bool,
    /// Current label text.
    pub label: String,
    /// Whether a spinner is shown.
    pub loading: bool,
}

impl ActionState {
    /// An idle, clickable action.
    #[must_use]
    pub fn idle(label: &str) -> Self {
        Self {
            disabled: false,
            label: label.to_string(),
            loading: false,
        }
    }

    fn busy(label: &str) -> Self {
        Self {
            disabled: true,
            label: label.to_string(),
            loading: true,
        }
    }
}

/// Progress bar state; exists only while a sync is in flight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressState {
    /// Whether the bar is rendered.
    pub visible: bool,
    /// Completion percentage in `0..=100`.
    pub percent: u8,
}

impl ProgressState {
    const fn hidden() -> Self {
        Self {
            visible: false,
            percent: 0,
        }
    }

    const fn at_zero() -> Self {
        Self {
            visible: true,
            percent: 0,
        }
    }
}

/// Banner severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Terminal success.
    Success,
    /// Terminal failure.
    Danger,
}

/// Transient status banner; overwritten on every attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusBanner {
    /// Whether the banner is rendered.
    pub visible: bool,
    /// Banner text.
    pub message: String,
    /// Success or danger styling.
    pub severity: Severity,
}

impl StatusBanner {
    const fn hidden() -> Self {
        Self {
            visible: false,
            message: String::new(),
            severity: Severity::Success,
        }
    }

    fn shown(message: &str, severity: Severity) -> Self {
        Self {
            visible: true,
            message: message.to_string(),
            severity,
        }
    }
}

/// Whole-screen state driven by [`AdminAction`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminState {
    /// Sync button state.
    pub sync: ActionState,
    /// Reset button state.
    pub reset: ActionState,
    /// Progress bar state for the in-flight sync.
    pub progress: ProgressState,
    /// Status banner.
    pub banner: StatusBanner,
    /// Whether the background-sync hint is shown.
    pub hint_visible: bool,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            sync: ActionState::idle(SYNC_IDLE_LABEL),
            reset: ActionState::idle(RESET_IDLE_LABEL),
            progress: ProgressState::hidden(),
            banner: StatusBanner::hidden(),
            hint_visible: false,
        }
    }
}

impl AdminState {
    /// Apply one transition, producing the next state.
    #[must_use]
    pub fn apply(&self, action: &AdminAction) -> Self {
        let mut next = self.clone();
        match action {
            AdminAction::SyncApproved => {
                next.banner = StatusBanner::hidden();
                next.hint_visible = true;
                next.sync = ActionState::busy(SYNC_BUSY_LABEL);
                next.progress = ProgressState::at_zero();
            }
            AdminAction::SyncProgress(percent) => {
                if next.progress.visible {
                    next.progress.percent = (*percent).min(100);
                }
            }
            AdminAction::SyncCompleted => {
                next.sync = ActionState::idle(SYNC_IDLE_LABEL);
                next.banner = StatusBanner::shown(SYNC_SUCCESS_MESSAGE, Severity::Success);
                next.hint_visible = false;
                next.progress = ProgressState::hidden();
            }
            AdminAction::SyncFailed { message } => {
                next.sync = ActionState::idle(SYNC_IDLE_LABEL);
                next.banner = StatusBanner::shown(message, Severity::Danger);
                next.hint_visible = false;
                next.progress = ProgressState::hidden();
            }
            AdminAction::ResetApproved => {
                next.reset = ActionState::busy(RESET_BUSY_LABEL);
            }
            AdminAction::ResetSucceeded => {
                // Deliberately stays disabled: a reload is imminent.
                next.reset = ActionState {
                    disabled: true,
                    label: RESET_DONE_LABEL.to_string(),
                    loading: false,
                };
            }
            AdminAction::ResetFailed => {
                next.reset = ActionState::idle(RESET_IDLE_LABEL);
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invariant(state: &AdminState) {
        if !state.progress.visible {
            assert_eq!(state.progress.percent, 0, "hidden progress must read 0");
        }
    }

    #[test]
    fn sync_success_scenario() {
        // Approve, stream 40 then complete at 100.
        let state = AdminState::default();
        let state = state.apply(&AdminAction::SyncApproved);
        assert!(state.sync.disabled);
        assert!(state.sync.loading);
        assert_eq!(state.sync.label, SYNC_BUSY_LABEL);
        assert!(state.hint_visible);
        assert!(state.progress.visible);
        assert_eq!(state.progress.percent, 0);
        assert!(!state.banner.visible);
        assert_invariant(&state);

        let state = state.apply(&AdminAction::SyncProgress(40));
        assert_eq!(state.progress.percent, 40);

        let state = state.apply(&AdminAction::SyncCompleted);
        assert!(!state.sync.disabled);
        assert_eq!(state.sync.label, SYNC_IDLE_LABEL);
        assert!(state.banner.visible);
        assert_eq!(state.banner.severity, Severity::Success);
        assert!(!state.hint_visible);
        assert_invariant(&state);
    }

    #[test]
    fn sync_stream_failure_re_enables_the_action() {
        let state = AdminState::default()
            .apply(&AdminAction::SyncApproved)
            .apply(&AdminAction::SyncFailed {
                message: SYNC_STREAM_FAILED_MESSAGE.to_string(),
            });
        assert!(!state.sync.disabled);
        assert_eq!(state.banner.severity, Severity::Danger);
        assert_eq!(state.banner.message, SYNC_STREAM_FAILED_MESSAGE);
        assert!(!state.progress.visible);
        assert_invariant(&state);
    }

    #[test]
    fn new_attempt_clears_the_previous_banner() {
        let state = AdminState::default()
            .apply(&AdminAction::SyncFailed {
                message: SYNC_DISPATCH_FAILED_MESSAGE.to_string(),
            })
            .apply(&AdminAction::SyncApproved);
        assert!(!state.banner.visible);
    }

    #[test]
    fn progress_updates_are_ignored_after_settling() {
        let state = AdminState::default()
            .apply(&AdminAction::SyncApproved)
            .apply(&AdminAction::SyncCompleted)
            .apply(&AdminAction::SyncProgress(55));
        assert_invariant(&state);
        assert_eq!(state.progress.percent, 0);
    }

    #[test]
    fn sync_and_reset_are_independent() {
        let state = AdminState::default()
            .apply(&AdminAction::SyncApproved)
            .apply(&AdminAction::ResetApproved);
        assert!(state.sync.disabled);
        assert!(state.reset.disabled);

        let state = state.apply(&AdminAction::ResetFailed);
        assert!(state.sync.disabled, "reset settling must not touch sync");
        assert!(!state.reset.disabled);

        let state = state.apply(&AdminAction::SyncCompleted);
        assert!(!state.sync.disabled);
        assert_eq!(state.reset.label, RESET_IDLE_LABEL);
    }

    #[test]
    fn reset_success_keeps_the_button_disabled() {
        let state = AdminState::default()
            .apply(&AdminAction::ResetApproved)
            .apply(&AdminAction::ResetSucceeded);
        assert!(state.reset.disabled);
        assert_eq!(state.reset.label, RESET_DONE_LABEL);
        assert!(!state.reset.loading);
    }

    #[test]
    fn reset_failure_reverts_to_idle() {
        let state = AdminState::default()
            .apply(&AdminAction::ResetApproved)
            .apply(&AdminAction::ResetFailed);
        assert!(!state.reset.disabled);
        assert_eq!(state.reset.label, RESET_IDLE_LABEL);
    }

    #[test]
    fn progress_is_clamped() {
        let state = AdminState::default()
            .apply(&AdminAction::SyncApproved)
            .apply(&AdminAction::SyncProgress(130));
        assert_eq!(state.progress.percent, 100);
    }
}
