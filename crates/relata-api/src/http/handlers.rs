//! Request handlers for the relations snapshot and the two triggers.

// axum requires async handler signatures even when nothing awaits.
#![allow(clippy::unused_async)]

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use relata_api_models::RelationsResponse;
use serde::Deserialize;
use tracing::info;

use crate::http::errors::ApiError;
use crate::job::spawn_sync_job;
use crate::state::ApiState;

/// Query parameters carrying the shop scope.
#[derive(Debug, Deserialize)]
pub(crate) struct ShopQuery {
    #[serde(default)]
    shop: Option<String>,
}

impl ShopQuery {
    /// Extract a non-empty shop domain or reject the request.
    pub(crate) fn shop(&self) -> Result<&str, ApiError> {
        match self.shop.as_deref().map(str::trim) {
            Some(shop) if !shop.is_empty() => Ok(shop),
            _ => Err(ApiError::bad_request("shop query parameter is required")),
        }
    }
}

/// `GET /v1/relations` — the snapshot the admin screen renders.
pub(crate) async fn get_relations(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ShopQuery>,
) -> Result<Json<RelationsResponse>, ApiError> {
    let shop = query.shop()?;
    Ok(Json(state.relations_for(shop)))
}

/// `POST /v1/sync` — fire-and-forget sync trigger.
///
/// The response body carries nothing the caller may depend on; progress
/// is observed on the event stream.
pub(crate) async fn trigger_sync(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ShopQuery>,
) -> Result<StatusCode, ApiError> {
    let shop = query.shop()?;
    info!(shop = %shop, "sync trigger accepted");
    spawn_sync_job(state.bus.clone(), shop.to_string());
    Ok(StatusCode::ACCEPTED)
}

/// `POST /v1/reset` — awaited reset of all parent/child relations.
pub(crate) async fn trigger_reset(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ShopQuery>,
) -> Result<StatusCode, ApiError> {
    let shop = query.shop()?;
    info!(shop = %shop, "resetting relations");
    state.clear_relations(shop);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_shop_is_rejected() {
        let query = ShopQuery {
            shop: Some("   ".to_string()),
        };
        assert!(query.shop().is_err());
        let query = ShopQuery { shop: None };
        assert!(query.shop().is_err());
    }

    #[test]
    fn shop_is_trimmed() {
        let query = ShopQuery {
            shop: Some(" demo.myshopify.com ".to_string()),
        };
        assert_eq!(query.shop().expect("valid shop"), "demo.myshopify.com");
    }
}
