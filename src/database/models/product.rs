use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog product as read: the stored row joined with its category's
/// display name, so screens never resolve the reference themselves
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductWithCategory {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub is_personalizable: bool,
    pub details: Option<String>,
    pub image_url: Option<String>,
    /// Average review rating, populated by the review pipeline
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a product insert
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
    pub is_personalizable: bool,
    pub details: Option<String>,
    pub image_url: String,
}

/// Validated fields for a product update; `image_url` stays untouched when None
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Uuid,
    pub is_personalizable: bool,
    pub details: Option<String>,
    pub image_url: Option<String>,
}
