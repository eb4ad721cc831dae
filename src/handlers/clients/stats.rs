use serde_json::{json, Value};

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::stats_service::StatsService;

/// GET /api/clients/newClientsStats - Registration metrics for the dashboard
pub async fn new_clients_stats() -> ApiResult<Value> {
    let stats = StatsService::new_clients().await?;
    Ok(ApiResponse::success(json!(stats)))
}

/// GET /api/clients/total - Total number of registered clients
pub async fn total_clients() -> ApiResult<Value> {
    let total = StatsService::total_clients().await?;
    Ok(ApiResponse::success(json!({ "total": total })))
}

/// GET /api/clients/detailedStats - The detailed aggregation was never
/// implemented upstream; answer an empty-data success so dashboards that
/// probe it keep working.
pub async fn detailed_stats() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({}))
        .with_message("Detailed client statistics are not implemented"))
}
