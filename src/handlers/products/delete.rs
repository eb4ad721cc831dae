use axum::extract::Path;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::repository;
use crate::middleware::response::{ApiResponse, ApiResult};

/// DELETE /api/products/:id - Remove a product from the catalog
pub async fn delete(Path(id): Path<Uuid>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    repository::delete_product(&pool, id).await?;

    Ok(ApiResponse::success(json!({ "id": id })).with_message("Product deleted successfully"))
}
