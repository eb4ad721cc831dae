use axum::extract::Multipart;
use serde_json::Value;

use crate::api::format::product_to_api_value;
use crate::database::manager::DatabaseManager;
use crate::database::models::NewProduct;
use crate::database::repository;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::upload::{read_product_form, store_image};
use crate::validation::validate_product_data;

use super::utils::{normalized_details, parse_fields};

/// POST /api/products - Create a product from a multipart form
pub async fn create(multipart: Multipart) -> ApiResult<Value> {
    let input = read_product_form(multipart).await?;

    validate_product_data(&input).into_result()?;

    // Validation guarantees an image is staged on create
    let image = input
        .image
        .as_ref()
        .ok_or_else(|| ApiError::bad_request("A product image is required"))?;
    let image_url = store_image(image, "products").await?;

    let parsed = parse_fields(&input)?;
    let new_product = NewProduct {
        name: input.name.trim().to_string(),
        description: input.description.trim().to_string(),
        price: parsed.price,
        stock: parsed.stock,
        category_id: parsed.category_id,
        is_personalizable: input.is_personalizable,
        details: normalized_details(&input),
        image_url,
    };

    let pool = DatabaseManager::pool().await?;
    let product = repository::insert_product(&pool, &new_product).await?;

    Ok(ApiResponse::created(product_to_api_value(&product))
        .with_message("Product created successfully"))
}
