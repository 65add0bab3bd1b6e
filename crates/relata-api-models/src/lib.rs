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
//! Shared HTTP DTOs for the Relata admin surface.
//!
//! These types are reused by the server and the web UI so the wire
//! contract (relations snapshot, plan info, sync progress events) has a
//! single source of truth.

use serde::{Deserialize, Serialize};

/// Maximum progress value; anything at or above this is terminal.
pub const PROGRESS_COMPLETE: u8 = 100;

/// A Shopify collection reference as surfaced to the admin screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionRef {
    /// Numeric Shopify collection id.
    pub id: u64,
    /// Collection title shown on the card.
    pub title: String,
}

/// A child collection derived from a parent via tag rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChildCollection {
    /// Numeric Shopify collection id.
    pub id: u64,
    /// Collection title shown on the card.
    pub title: String,
    /// Product tag the child collection is built from.
    pub tag: String,
    /// Storefront redirect path for the child collection.
    pub redirect: String,
}

/// One parent collection together with its derived children.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionRelation {
    /// The parent collection.
    pub parent: CollectionRef,
    /// Child collections generated for the parent.
    pub children: Vec<ChildCollection>,
}

/// Billing plan summary attached to the relations snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanInfo {
    /// Plan name as recorded by the billing collaborator.
    pub name: String,
}

impl PlanInfo {
    /// Whether the merchant should be offered a plan upgrade.
    ///
    /// The rule is currently a literal plan-name comparison; keeping it
    /// here means a future capability flag from the backend changes one
    /// function, not every caller.
    #[must_use]
    pub fn upgradeable(&self) -> bool {
        self.name == "Basic"
    }
}

/// Response body for the relations listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationsResponse {
    /// All parent/child relations for the shop.
    #[serde(default)]
    pub relations: Vec<CollectionRelation>,
    /// The shop's current billing plan.
    #[serde(default)]
    pub current_plan: PlanInfo,
}

/// Progress event emitted on the sync event stream.
///
/// A payload without a `progress` field decodes as `0`; one bad frame
/// must never abort an otherwise healthy stream.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncProgressEvent {
    /// Completion percentage in `0..=100`.
    #[serde(default)]
    pub progress: u8,
}

impl SyncProgressEvent {
    /// Whether this event terminates the stream.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.progress >= PROGRESS_COMPLETE
    }
}

/// RFC9457-compatible problem document surfaced on request errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    /// URI reference identifying the problem type.
    pub kind: String,
    /// Short, human-readable summary of the issue.
    pub title: String,
    /// HTTP status code associated with the error.
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Detailed diagnostic message when available.
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_defaults_to_zero_when_missing() {
        let event: SyncProgressEvent = serde_json::from_str("{}").expect("empty object decodes");
        assert_eq!(event.progress, 0);
        assert!(!event.is_terminal());
    }

    #[test]
    fn progress_at_or_above_hundred_is_terminal() {
        assert!(SyncProgressEvent { progress: 100 }.is_terminal());
        assert!(SyncProgressEvent { progress: 250 }.is_terminal());
        assert!(!SyncProgressEvent { progress: 99 }.is_terminal());
    }

    #[test]
    fn relations_response_tolerates_missing_fields() {
        let resp: RelationsResponse = serde_json::from_str("{}").expect("empty object decodes");
        assert!(resp.relations.is_empty());
        assert!(!resp.current_plan.upgradeable());
    }

    #[test]
    fn basic_plan_is_upgradeable() {
        let plan = PlanInfo {
            name: "Basic".to_string(),
        };
        assert!(plan.upgradeable());
        let plan = PlanInfo {
            name: "Pro".to_string(),
        };
        assert!(!plan.upgradeable());
    }
}
