use serde_json::Value;

use crate::api::format::categories_to_api_values;
use crate::database::manager::DatabaseManager;
use crate::database::repository;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/categories - Flat category list for product form selection
pub async fn list() -> ApiResult<Vec<Value>> {
    let pool = DatabaseManager::pool().await?;
    let categories = repository::list_categories(&pool).await?;

    Ok(ApiResponse::success(categories_to_api_values(&categories)))
}
