use serde_json::Value;

use crate::api::format::products_to_api_values;
use crate::database::manager::DatabaseManager;
use crate::database::repository;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/products - Full catalog with embedded category references
pub async fn list() -> ApiResult<Vec<Value>> {
    let pool = DatabaseManager::pool().await?;
    let products = repository::list_products(&pool).await?;

    Ok(ApiResponse::success(products_to_api_values(&products)))
}
