//! Trigger calls for the admin actions.
//!
//! # Design
//! - Sync is fire-and-forget: the response body is ignored and only a
//!   dispatch failure is surfaced.
//! - Reset is awaited and a non-2xx status is a failure.

use anyhow::bail;
use gloo_net::http::Request;
use relata_api_models::RelationsResponse;

use crate::endpoints::{relations_url, reset_trigger_url, sync_trigger_url};

/// Fetch the relations snapshot rendered by the screen.
pub(crate) async fn fetch_relations(
    base_url: &str,
    shop: &str,
) -> anyhow::Result<RelationsResponse> {
    let response = Request::get(&relations_url(base_url, shop)).send().await?;
    Ok(response.json::<RelationsResponse>().await?)
}

/// Dispatch the sync trigger.
///
/// The body and status are deliberately ignored; progress arrives on
/// the event stream. An error here means the call never left.
pub(crate) async fn trigger_sync(base_url: &str, shop: &str) -> anyhow::Result<()> {
    Request::post(&sync_trigger_url(base_url, shop))
        .send()
        .await?;
    Ok(())
}

/// Dispatch the reset trigger and wait for its acknowledgement.
pub(crate) async fn trigger_reset(base_url: &str, shop: &str) -> anyhow::Result<()> {
    let response = Request::post(&reset_trigger_url(base_url, shop))
        .send()
        .await?;
    if !response.ok() {
        bail!("reset failed with http {}", response.status());
    }
    Ok(())
}
