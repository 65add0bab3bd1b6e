//! Presentational relation cards for the admin screen.

#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
