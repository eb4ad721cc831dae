use axum::extract::Multipart;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use storefront_api_rust::client::products::{ActiveTab, ProductAdmin};
use storefront_api_rust::client::ApiClient;
use storefront_api_rust::validation::ImageFile;

/// Stand-in backend for the admin controller: categories answer in the
/// wrapped envelope, products in the legacy bare array, so one flow
/// exercises both conventions.
async fn spawn_stub() -> String {
    let app = Router::new()
        .route(
            "/api/products",
            get(|| async { Json(json!([])) }).post(create_product),
        )
        .route(
            "/api/products/:id",
            axum::routing::delete(|| async {
                Json(json!({ "success": true, "message": "Product deleted successfully" }))
            }),
        )
        .route(
            "/api/categories",
            get(|| async {
                Json(json!({
                    "success": true,
                    "data": [
                        { "_id": "c1", "name": "Flowers" },
                        { "_id": "c2", "name": "Frames" }
                    ]
                }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api", addr)
}

/// Echo back a created product the way the backend does: the category
/// reference stays a bare id; the client enriches it locally.
async fn create_product(mut multipart: Multipart) -> Json<Value> {
    let mut name = String::new();
    let mut category_id = String::new();
    let mut had_image = false;

    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = field.text().await.unwrap(),
            "categoryId" => category_id = field.text().await.unwrap(),
            "images" => had_image = !field.bytes().await.unwrap().is_empty(),
            _ => {
                let _ = field.bytes().await;
            }
        }
    }
    assert!(had_image, "the create call must carry the staged image");

    Json(json!({
        "success": true,
        "message": "Product created successfully",
        "data": {
            "_id": "p-created",
            "name": name,
            "description": "A bouquet of dried lavender",
            "price": "19.99",
            "stock": 5,
            "categoryId": category_id,
        }
    }))
}

fn one_mb_jpeg() -> ImageFile {
    ImageFile {
        file_name: "photo.jpg".into(),
        content_type: "image/jpeg".into(),
        bytes: vec![0u8; 1024 * 1024],
    }
}

#[tokio::test]
async fn create_flow_appends_an_enriched_product_and_resets_the_form() {
    let base_url = spawn_stub().await;
    let mut admin = ProductAdmin::new(ApiClient::new(base_url));

    admin.initialize().await.expect("initial load");
    assert!(admin.products.is_empty());
    assert_eq!(admin.categories.len(), 2);

    admin.active_tab = ActiveTab::Form;
    admin.form.name = "AB".into();
    admin.form.description = "0123456789".into();
    admin.form.price = "19.99".into();
    admin.form.stock = "5".into();
    admin.form.category_id = "c1".into();
    admin.form.image = Some(one_mb_jpeg());

    let message = admin.create_product().await.expect("create should succeed");
    assert_eq!(message.as_deref(), Some("Product created successfully"));

    // The new record lands in the cached list, enriched with the display
    // name looked up from the already-fetched categories
    assert_eq!(admin.products.len(), 1);
    let created = &admin.products[0];
    assert_eq!(created.id, "p-created");
    assert_eq!(created.category.name(), Some("Flowers"));

    // Form reset and back on the list tab
    assert_eq!(admin.active_tab, ActiveTab::List);
    assert!(admin.form.name.is_empty());
    assert!(admin.form.image.is_none());
    assert!(!admin.is_submitting);
}

#[tokio::test]
async fn delete_flow_refetches_the_list() {
    let base_url = spawn_stub().await;
    let mut admin = ProductAdmin::new(ApiClient::new(base_url));

    let message = admin.delete_product("p-gone").await.expect("delete should succeed");
    assert_eq!(message.as_deref(), Some("Product deleted successfully"));

    // The stub's list is the source of truth after the re-fetch
    assert!(admin.products.is_empty());
    assert!(!admin.loading);
}
