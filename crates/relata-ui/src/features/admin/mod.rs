//! Sync/Reset orchestration feature slice.
//!
//! # Design
//! - The reducer in [`state`] owns every UI-visible transition of the
//!   Sync and Reset state machines and runs in host-side tests.
//! - API calls and DOM wiring stay in the wasm-gated `api` and `view`
//!   layers.

pub mod actions;
#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
