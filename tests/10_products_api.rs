mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

#[tokio::test]
async fn invalid_product_post_answers_400_with_field_errors() {
    let body = common::multipart_body(
        &[
            ("name", "A"),
            ("description", "short"),
            ("price", "not-a-price"),
            ("stock", "-2"),
            ("categoryId", ""),
        ],
        None,
    );

    let (status, body) = common::send(common::multipart_request("POST", "/api/products", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let field_errors = &body["field_errors"];
    assert!(field_errors.get("name").is_some());
    assert!(field_errors.get("description").is_some());
    assert!(field_errors.get("price").is_some());
    assert!(field_errors.get("stock").is_some());
    assert!(field_errors.get("categoryId").is_some());
    // No image staged on create
    assert!(field_errors.get("image").is_some());
}

#[tokio::test]
async fn oversized_image_is_rejected_citing_the_limit() {
    let six_mb = vec![0u8; 6 * 1024 * 1024];
    let body = common::multipart_body(
        &[("name", "Dried lavender bouquet")],
        Some(("images", "big.jpg", "image/jpeg", &six_mb)),
    );

    let (status, body) = common::send(common::multipart_request("POST", "/api/products", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().unwrap_or_default().contains("5MB"),
        "error should cite the 5MB limit: {}",
        body
    );
}

#[tokio::test]
async fn non_image_upload_is_rejected() {
    let body = common::multipart_body(
        &[("name", "Dried lavender bouquet")],
        Some(("images", "notes.pdf", "application/pdf", b"%PDF-1.4")),
    );

    let (status, body) = common::send(common::multipart_request("POST", "/api/products", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("image files"),
        "unexpected error: {}",
        body
    );
}

#[tokio::test]
async fn json_edit_with_invalid_fields_answers_400() {
    let request = Request::builder()
        .method("PUT")
        .uri("/api/products/6dfef221-9f04-4c7f-9a2f-6d4b4c8f4e10")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "name": "A",
                "description": "short",
                "price": 0,
                "stock": -1,
                "categoryId": ""
            })
            .to_string(),
        ))
        .unwrap();

    let (status, body) = common::send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["field_errors"].get("price").is_some());
    // Edits keep the stored image, so its absence is not an error
    assert!(body["field_errors"].get("image").is_none());
}

#[tokio::test]
async fn malformed_json_edit_is_a_400() {
    let request = Request::builder()
        .method("PUT")
        .uri("/api/products/6dfef221-9f04-4c7f-9a2f-6d4b4c8f4e10")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = common::send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_with_a_malformed_id_is_rejected() {
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/products/not-a-uuid")
        .body(Body::empty())
        .unwrap();

    let (status, _) = common::send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
