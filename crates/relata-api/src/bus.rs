//! Per-shop progress fan-out for sync jobs.
//!
//! # Design
//! - One bounded `tokio::broadcast` channel per shop, created lazily.
//! - No replay buffer: the admin screen never reconnects mid-job, it
//!   re-triggers the action instead.
//! - Publishing to a shop with no subscribers is not an error; the job
//!   driver keeps emitting regardless of who is watching.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use relata_api_models::SyncProgressEvent;
use tokio::sync::broadcast;

/// Broadcast capacity per shop; progress events are tiny and frequent
/// consumers drain them immediately.
const CHANNEL_CAPACITY: usize = 64;

/// Shared progress bus keyed by shop domain.
#[derive(Clone, Default)]
pub struct SyncBus {
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<SyncProgressEvent>>>>,
}

impl SyncBus {
    /// Construct an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a progress event for the given shop.
    ///
    /// Returns the number of live subscribers that received the event.
    ///
    /// # Panics
    ///
    /// Panics if the channel map mutex has been poisoned.
    pub fn publish(&self, shop: &str, event: SyncProgressEvent) -> usize {
        let sender = self.sender_for(shop);
        sender.send(event).unwrap_or(0)
    }

    /// Subscribe to progress events for the given shop.
    ///
    /// # Panics
    ///
    /// Panics if the channel map mutex has been poisoned.
    #[must_use]
    pub fn subscribe(&self, shop: &str) -> broadcast::Receiver<SyncProgressEvent> {
        self.sender_for(shop).subscribe()
    }

    /// Drop a shop's channel once its last subscriber is gone.
    ///
    /// A no-op while receivers remain; a later publish recreates the
    /// channel lazily, so callers release eagerly when a job or stream
    /// ends and the map stays bounded by the set of active shops.
    ///
    /// # Panics
    ///
    /// Panics if the channel map mutex has been poisoned.
    pub fn release(&self, shop: &str) {
        let mut channels = self.channels.lock().expect("sync bus mutex poisoned");
        if channels
            .get(shop)
            .is_some_and(|sender| sender.receiver_count() == 0)
        {
            channels.remove(shop);
        }
    }

    /// Number of shops currently holding a live channel.
    ///
    /// # Panics
    ///
    /// Panics if the channel map mutex has been poisoned.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.lock().expect("sync bus mutex poisoned").len()
    }

    fn sender_for(&self, shop: &str) -> broadcast::Sender<SyncProgressEvent> {
        let mut channels = self.channels.lock().expect("sync bus mutex poisoned");
        channels
            .entry(shop.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = SyncBus::new();
        let mut rx = bus.subscribe("demo.myshopify.com");
        let delivered = bus.publish("demo.myshopify.com", SyncProgressEvent { progress: 40 });
        assert_eq!(delivered, 1);
        let event = rx.recv().await.expect("event delivered");
        assert_eq!(event.progress, 40);
    }

    #[tokio::test]
    async fn shops_are_isolated() {
        let bus = SyncBus::new();
        let mut other = bus.subscribe("other.myshopify.com");
        bus.publish("demo.myshopify.com", SyncProgressEvent { progress: 10 });
        assert!(other.try_recv().is_err());
    }

    #[test]
    fn release_waits_for_the_last_subscriber() {
        let bus = SyncBus::new();
        let rx = bus.subscribe("demo.myshopify.com");
        bus.release("demo.myshopify.com");
        assert_eq!(bus.channel_count(), 1, "live subscribers keep the channel");
        drop(rx);
        bus.release("demo.myshopify.com");
        assert_eq!(bus.channel_count(), 0);
    }

    #[test]
    fn released_shop_can_sync_again() {
        let bus = SyncBus::new();
        drop(bus.subscribe("demo.myshopify.com"));
        bus.release("demo.myshopify.com");
        let mut rx = bus.subscribe("demo.myshopify.com");
        bus.publish("demo.myshopify.com", SyncProgressEvent { progress: 10 });
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let bus = SyncBus::new();
        assert_eq!(
            bus.publish("demo.myshopify.com", SyncProgressEvent { progress: 100 }),
            0
        );
    }
}
