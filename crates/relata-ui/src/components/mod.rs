//! Presentation atoms for the admin screen.

pub(crate) mod banner;
pub(crate) mod confirm_dialog;
pub(crate) mod progress;
