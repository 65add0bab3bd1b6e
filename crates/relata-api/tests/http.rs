//! Router-level tests exercising the admin screen's backend contract.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use relata_api::{ApiState, build_router};
use relata_api_models::{RelationsResponse, SyncProgressEvent};
use tower::ServiceExt;

const SHOP: &str = "demo.myshopify.com";

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn relations_requires_shop_parameter() {
    let router = build_router(Arc::new(ApiState::new()));
    let response = router
        .oneshot(request("GET", "/v1/relations"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.expect("body").to_bytes();
    let problem: serde_json::Value = serde_json::from_slice(&body).expect("problem json");
    assert_eq!(problem["status"], 400);
}

#[tokio::test]
async fn relations_returns_seeded_snapshot() {
    let router = build_router(Arc::new(ApiState::with_sample_data(SHOP)));
    let response = router
        .oneshot(request("GET", &format!("/v1/relations?shop={SHOP}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.expect("body").to_bytes();
    let snapshot: RelationsResponse = serde_json::from_slice(&body).expect("snapshot json");
    assert_eq!(snapshot.relations.len(), 1);
    assert_eq!(snapshot.relations[0].children.len(), 2);
    assert!(snapshot.current_plan.upgradeable());
}

#[tokio::test]
async fn reset_clears_relations() {
    let state = Arc::new(ApiState::with_sample_data(SHOP));
    let router = build_router(state.clone());

    let response = router
        .clone()
        .oneshot(request("POST", &format!("/v1/reset?shop={SHOP}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(state.relations_for(SHOP).relations.is_empty());
}

#[tokio::test]
async fn sync_trigger_is_accepted() {
    let router = build_router(Arc::new(ApiState::new()));
    let response = router
        .oneshot(request("POST", &format!("/v1/sync?shop={SHOP}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn event_stream_ends_after_terminal_progress() {
    let state = Arc::new(ApiState::new());
    let router = build_router(state.clone());

    let publisher = {
        let bus = state.bus.clone();
        tokio::spawn(async move {
            // Give the handler time to subscribe before publishing.
            tokio::time::sleep(Duration::from_millis(100)).await;
            bus.publish(SHOP, SyncProgressEvent { progress: 40 });
            bus.publish(SHOP, SyncProgressEvent { progress: 100 });
        })
    };

    let response = router
        .oneshot(request("GET", &format!("/v1/sync/events?shop={SHOP}")))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    // Collecting the body only finishes because the stream terminates at 100.
    let body = response.into_body().collect().await.expect("body").to_bytes();
    let text = String::from_utf8(body.to_vec()).expect("utf8 body");
    assert!(text.contains("\"progress\":40"));
    assert!(text.contains("\"progress\":100"));
    publisher.await.expect("publisher task");
    assert_eq!(
        state.bus.channel_count(),
        0,
        "finished stream releases the shop channel"
    );
}
