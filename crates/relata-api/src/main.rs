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
//! Binary entrypoint for the Relata API server.

use std::sync::Arc;

use anyhow::Result;
use relata_api::{ApiState, AppConfig, serve, telemetry};

/// Shop seeded with demo relations when the server starts empty.
const DEMO_SHOP: &str = "demo.myshopify.com";

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_logging()?;
    let config = AppConfig::from_env()?;
    let state = Arc::new(ApiState::with_sample_data(DEMO_SHOP));
    serve(config, state).await
}
