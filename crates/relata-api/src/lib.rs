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
#![allow(clippy::multiple_crate_versions)]
//! HTTP surface for the Relata admin screen.
//!
//! Exposes the relations snapshot, the fire-and-forget sync trigger, the
//! sync progress event stream (SSE), and the awaited reset trigger. The
//! real sync job lives in an external worker; this crate ships a
//! simulated driver so the admin screen has a collaborator that honours
//! the "respond to a trigger, emit progress events" contract end to end.

pub mod bus;
pub mod config;
pub mod http;
pub mod job;
pub mod state;
pub mod telemetry;

pub use bus::SyncBus;
pub use config::AppConfig;
pub use http::router::{build_router, serve};
pub use state::ApiState;
