use axum::extract::{FromRequest, Multipart, Path, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::api::format::product_to_api_value;
use crate::database::manager::DatabaseManager;
use crate::database::models::ProductChanges;
use crate::database::repository;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::upload::{read_product_form, store_image};
use crate::validation::{validate_product_data, ProductInput};

use super::utils::{normalized_details, parse_fields};

/// JSON body for text-only edits; a staged image arrives as multipart instead
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductBody {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: String,
    #[serde(default)]
    pub is_personalizable: bool,
    #[serde(default)]
    pub details: String,
}

impl UpdateProductBody {
    fn into_input(self) -> ProductInput {
        ProductInput {
            id: None,
            name: self.name,
            description: self.description,
            price: self.price.to_string(),
            stock: self.stock.to_string(),
            category_id: self.category_id,
            is_personalizable: self.is_personalizable,
            details: self.details,
            image: None,
        }
    }
}

/// PUT /api/products/:id - Update a product. Accepts a multipart form when
/// a replacement image is staged and plain JSON for text-only edits.
pub async fn update(Path(id): Path<Uuid>, request: Request) -> ApiResult<Value> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let mut input = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::bad_request(format!("Malformed multipart request: {}", e)))?;
        read_product_form(multipart).await?
    } else {
        let Json(body) = Json::<UpdateProductBody>::from_request(request, &())
            .await
            .map_err(|e| ApiError::invalid_json(e.to_string()))?;
        body.into_input()
    };
    input.id = Some(id.to_string());

    validate_product_data(&input).into_result()?;

    let image_url = match input.image.as_ref() {
        Some(image) => Some(store_image(image, "products").await?),
        None => None,
    };

    let parsed = parse_fields(&input)?;
    let changes = ProductChanges {
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
    let product = repository::update_product(&pool, id, &changes).await?;

    Ok(ApiResponse::success(product_to_api_value(&product))
        .with_message("Product updated successfully"))
}
