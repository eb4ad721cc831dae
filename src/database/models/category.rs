use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flat category reference used for product form selection
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}
