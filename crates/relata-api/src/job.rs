//! Simulated sync job driver.
//!
//! # Design
//! - The real job (collection creation, scheduling) runs in an external
//!   worker; this driver only honours the progress contract so the admin
//!   screen can be exercised end to end.
//! - Progress walks to 100 in fixed steps; the terminal event is always
//!   emitted, even if nobody is subscribed.

use std::time::Duration;

use relata_api_models::{PROGRESS_COMPLETE, SyncProgressEvent};
use tokio::time::sleep;
use tracing::info;

use crate::bus::SyncBus;

/// Step size for simulated progress updates.
const PROGRESS_STEP: u8 = 10;

/// Pause between simulated progress updates.
const STEP_DELAY: Duration = Duration::from_millis(300);

/// Spawn the simulated sync job for a shop.
///
/// Returns immediately; progress is published on the bus as the job runs.
pub fn spawn_sync_job(bus: SyncBus, shop: String) {
    tokio::spawn(async move {
        info!(shop = %shop, "sync job started");
        let mut progress = 0u8;
        while progress < PROGRESS_COMPLETE {
            sleep(STEP_DELAY).await;
            progress = progress.saturating_add(PROGRESS_STEP).min(PROGRESS_COMPLETE);
            bus.publish(&shop, SyncProgressEvent { progress });
        }
        // Covers the nobody-watched case; a live stream releases the
        // channel itself once it finishes draining.
        bus.release(&shop);
        info!(shop = %shop, "sync job completed");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn job_emits_monotonic_progress_ending_at_complete() {
        let bus = SyncBus::new();
        let mut rx = bus.subscribe("demo.myshopify.com");
        spawn_sync_job(bus, "demo.myshopify.com".to_string());

        let mut last = 0u8;
        loop {
            let event = rx.recv().await.expect("progress event");
            assert!(event.progress >= last, "progress must not decrease");
            last = event.progress;
            if event.is_terminal() {
                break;
            }
        }
        assert_eq!(last, PROGRESS_COMPLETE);
    }
}
