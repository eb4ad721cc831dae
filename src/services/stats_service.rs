use rust_decimal::Decimal;
use serde::Serialize;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::OrderSummary;
use crate::database::repository::{self, MonthlyCount};

/// How far back the new-clients widget looks
const DEFAULT_STATS_MONTHS: i32 = 6;

#[derive(Debug, Clone, Serialize)]
pub struct NewClientsStats {
    pub monthly: Vec<MonthlyCount>,
    pub this_month: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardTotals {
    pub revenue: Decimal,
    pub orders: i64,
    pub clients: i64,
    pub products: i64,
}

/// Aggregations behind the admin dashboard and client-stats endpoints
pub struct StatsService;

impl StatsService {
    pub async fn new_clients() -> Result<NewClientsStats, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        let monthly = repository::new_clients_by_month(&pool, DEFAULT_STATS_MONTHS).await?;
        let this_month = monthly.last().map(|m| m.count).unwrap_or(0);

        Ok(NewClientsStats { monthly, this_month })
    }

    pub async fn total_clients() -> Result<i64, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        repository::count_clients(&pool).await
    }

    /// Revenue is derived from order documents rather than stored, so the
    /// dashboard and the per-order summaries can never disagree.
    pub async fn dashboard_totals() -> Result<DashboardTotals, DatabaseError> {
        let pool = DatabaseManager::pool().await?;

        let orders = repository::list_orders(&pool).await?;
        let revenue = orders
            .iter()
            .map(|order| OrderSummary::from_order(order).total)
            .sum();

        Ok(DashboardTotals {
            revenue,
            orders: repository::count_orders(&pool).await?,
            clients: repository::count_clients(&pool).await?,
            products: repository::count_products(&pool).await?,
        })
    }
}
