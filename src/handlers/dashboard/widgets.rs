use serde_json::Value;

use crate::api::format::{best_seller_to_api_value, products_to_api_values};
use crate::database::manager::DatabaseManager;
use crate::database::repository;
use crate::middleware::response::{ApiResponse, ApiResult};

/// How many entries the sidebar widgets show
const WIDGET_LIMIT: i64 = 5;

/// GET /api/dashboard/bestSellers - Products ranked by units sold
pub async fn best_sellers() -> ApiResult<Vec<Value>> {
    let pool = DatabaseManager::pool().await?;
    let entries = repository::best_sellers(&pool, WIDGET_LIMIT).await?;

    Ok(ApiResponse::success(
        entries.iter().map(best_seller_to_api_value).collect(),
    ))
}

/// GET /api/dashboard/topRated - Products ranked by review rating
pub async fn top_rated() -> ApiResult<Vec<Value>> {
    let pool = DatabaseManager::pool().await?;
    let products = repository::top_rated(&pool, WIDGET_LIMIT).await?;

    Ok(ApiResponse::success(products_to_api_values(&products)))
}
