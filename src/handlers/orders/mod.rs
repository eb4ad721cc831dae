use axum::extract::Path;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::OrderSummary;
use crate::database::repository;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

/// GET /api/orders/:id/summary - Read-only price breakdown for the payment
/// page: line totals, subtotal, flat shipping, and the final total.
pub async fn summary(Path(id): Path<Uuid>) -> ApiResult<OrderSummary> {
    let pool = DatabaseManager::pool().await?;
    let order = repository::get_order(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("order {} not found", id)))?;

    Ok(ApiResponse::success(OrderSummary::from_order(&order)))
}
