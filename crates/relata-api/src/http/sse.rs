//! Server-sent events stream for sync progress.

// axum requires async handler signatures even when nothing awaits.
#![allow(clippy::unused_async)]

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use async_stream::stream;
use axum::{
    extract::{Query, State},
    response::sse::{self, Sse},
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::http::errors::ApiError;
use crate::http::handlers::ShopQuery;
use crate::state::ApiState;

/// Keep-alive interval for idle progress streams.
const SSE_KEEP_ALIVE_SECS: u64 = 15;

/// `GET /v1/sync/events` — stream progress events for a shop's sync job.
///
/// The stream ends after the terminal event (`progress >= 100`); the
/// client treats transport errors as terminal failure and never
/// reconnects.
pub(crate) async fn stream_sync_events(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ShopQuery>,
) -> Result<Sse<impl futures_core::Stream<Item = Result<sse::Event, Infallible>> + Send>, ApiError>
{
    let shop = query.shop()?.to_string();
    let mut receiver = state.bus.subscribe(&shop);
    let bus = state.bus.clone();

    let stream = stream! {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let terminal = event.is_terminal();
                    match sse::Event::default().json_data(event) {
                        Ok(frame) => yield Ok(frame),
                        Err(err) => {
                            warn!(shop = %shop, error = %err, "failed to encode progress event");
                        }
                    }
                    if terminal {
                        debug!(shop = %shop, "progress stream complete");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(shop = %shop, skipped, "progress subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
        drop(receiver);
        bus.release(&shop);
    };

    Ok(Sse::new(stream).keep_alive(
        sse::KeepAlive::new()
            .interval(Duration::from_secs(SSE_KEEP_ALIVE_SECS))
            .text("keep-alive"),
    ))
}
