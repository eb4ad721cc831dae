use serde_json::{json, Value};

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::stats_service::StatsService;

/// GET /api/dashboard/summary - Headline numbers for the admin landing page
pub async fn summary() -> ApiResult<Value> {
    let totals = StatsService::dashboard_totals().await?;

    Ok(ApiResponse::success(json!({
        "revenue": totals.revenue,
        "orders": totals.orders,
        "clients": totals.clients,
        "products": totals.products,
    })))
}
