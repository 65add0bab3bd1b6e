//! Shared application state for the HTTP handlers.

use std::collections::HashMap;
use std::sync::Mutex;

use relata_api_models::{
    ChildCollection, CollectionRef, CollectionRelation, PlanInfo, RelationsResponse,
};

use crate::bus::SyncBus;

/// State shared across all request handlers.
pub struct ApiState {
    /// Per-shop relations snapshot, keyed by shop domain.
    relations: Mutex<HashMap<String, RelationsResponse>>,
    /// Progress fan-out for running sync jobs.
    pub bus: SyncBus,
}

impl ApiState {
    /// Construct empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            relations: Mutex::new(HashMap::new()),
            bus: SyncBus::new(),
        }
    }

    /// Construct state pre-seeded with a demo shop, for local development.
    #[must_use]
    pub fn with_sample_data(shop: &str) -> Self {
        let state = Self::new();
        state.store_relations(shop, sample_relations());
        state
    }

    /// Snapshot the relations for a shop, empty when none are recorded.
    ///
    /// # Panics
    ///
    /// Panics if the relations mutex has been poisoned.
    #[must_use]
    pub fn relations_for(&self, shop: &str) -> RelationsResponse {
        self.relations
            .lock()
            .expect("relations mutex poisoned")
            .get(shop)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the relations snapshot for a shop.
    ///
    /// # Panics
    ///
    /// Panics if the relations mutex has been poisoned.
    pub fn store_relations(&self, shop: &str, snapshot: RelationsResponse) {
        self.relations
            .lock()
            .expect("relations mutex poisoned")
            .insert(shop.to_string(), snapshot);
    }

    /// Drop all relations for a shop, keeping the plan record intact.
    ///
    /// # Panics
    ///
    /// Panics if the relations mutex has been poisoned.
    pub fn clear_relations(&self, shop: &str) {
        let mut relations = self.relations.lock().expect("relations mutex poisoned");
        if let Some(snapshot) = relations.get_mut(shop) {
            snapshot.relations.clear();
        }
    }
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Demo relations snapshot used when the server runs without a backing
/// worker.
#[must_use]
pub fn sample_relations() -> RelationsResponse {
    RelationsResponse {
        relations: vec![CollectionRelation {
            parent: CollectionRef {
                id: 488_237_101,
                title: "Summer Apparel".to_string(),
            },
            children: vec![
                ChildCollection {
                    id: 488_237_102,
                    title: "Summer Apparel - Shirts".to_string(),
                    tag: "shirts".to_string(),
                    redirect: "/collections/summer-apparel-shirts".to_string(),
                },
                ChildCollection {
                    id: 488_237_103,
                    title: "Summer Apparel - Shorts".to_string(),
                    tag: "shorts".to_string(),
                    redirect: "/collections/summer-apparel-shorts".to_string(),
                },
            ],
        }],
        current_plan: PlanInfo {
            name: "Basic".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_removes_relations_but_keeps_plan() {
        let state = ApiState::with_sample_data("demo.myshopify.com");
        state.clear_relations("demo.myshopify.com");
        let snapshot = state.relations_for("demo.myshopify.com");
        assert!(snapshot.relations.is_empty());
        assert_eq!(snapshot.current_plan.name, "Basic");
    }

    #[test]
    fn unknown_shop_yields_empty_snapshot() {
        let state = ApiState::new();
        let snapshot = state.relations_for("missing.myshopify.com");
        assert!(snapshot.relations.is_empty());
    }
}
