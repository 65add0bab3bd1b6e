#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Relata admin screen for parent/child collection relations.
//!
//! The interesting machinery lives in three places: the confirmation
//! gate ([`services::confirm`]), the sync progress channel
//! ([`services::stream`]), and the admin feature slice
//! ([`features::admin`]) whose reducer drives the Sync and Reset state
//! machines. Everything DOM-facing is gated to wasm so the state
//! machines stay testable on the host.

pub mod endpoints;
pub mod features;
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
