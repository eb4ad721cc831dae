mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

#[tokio::test]
async fn wheel_toggle_round_trips() {
    // Initial state is whatever it is; the toggle must round-trip
    let (status, _) = common::get("/api/discounts/wheel").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = set_wheel(true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enabled"], true);
    assert_eq!(body["message"], "Discount wheel enabled");

    let (status, body) = common::get("/api/discounts/wheel").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enabled"], true);

    let (status, body) = set_wheel(false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enabled"], false);

    let (_, body) = common::get("/api/discounts/wheel").await;
    assert_eq!(body["data"]["enabled"], false);
}

async fn set_wheel(enabled: bool) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri("/api/discounts/wheel")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "enabled": enabled }).to_string()))
        .unwrap();
    common::send(request).await
}

#[tokio::test]
async fn order_summary_rejects_malformed_ids() {
    let (status, _) = common::get("/api/orders/not-a-uuid/summary").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_are_404() {
    let (status, _) = common::get("/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
