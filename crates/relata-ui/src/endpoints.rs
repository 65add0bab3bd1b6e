//! URL construction for the backend collaborator and Shopify admin links.
//!
//! Kept DOM-free so URL shapes are covered by host-side tests.

use urlencoding::encode;

/// Build the relations snapshot URL for a shop.
#[must_use]
pub fn relations_url(base_url: &str, shop: &str) -> String {
    shop_scoped(base_url, "/v1/relations", shop)
}

/// Build the fire-and-forget sync trigger URL for a shop.
#[must_use]
pub fn sync_trigger_url(base_url: &str, shop: &str) -> String {
    shop_scoped(base_url, "/v1/sync", shop)
}

/// Build the sync progress stream URL for a shop.
#[must_use]
pub fn sync_events_url(base_url: &str, shop: &str) -> String {
    shop_scoped(base_url, "/v1/sync/events", shop)
}

/// Build the awaited reset trigger URL for a shop.
#[must_use]
pub fn reset_trigger_url(base_url: &str, shop: &str) -> String {
    shop_scoped(base_url, "/v1/reset", shop)
}

/// Link to the plan listing screen, shop-scoped like every other page.
#[must_use]
pub fn plans_url(shop: &str) -> String {
    format!("/plans?shop={}", encode(shop))
}

/// Deep link into the Shopify admin for editing a collection.
#[must_use]
pub fn collection_admin_url(shop: &str, collection_id: u64) -> String {
    format!("https://{shop}/admin/collections/{collection_id}")
}

fn shop_scoped(base_url: &str, path: &str, shop: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}{path}?shop={}", encode(shop))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shop_is_url_encoded() {
        let url = sync_trigger_url("http://localhost:8787", "demo store.myshopify.com");
        assert_eq!(
            url,
            "http://localhost:8787/v1/sync?shop=demo%20store.myshopify.com"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let url = relations_url("http://localhost:8787/", "demo.myshopify.com");
        assert_eq!(
            url,
            "http://localhost:8787/v1/relations?shop=demo.myshopify.com"
        );
    }

    #[test]
    fn admin_link_targets_the_collection() {
        assert_eq!(
            collection_admin_url("demo.myshopify.com", 42),
            "https://demo.myshopify.com/admin/collections/42"
        );
    }
}
