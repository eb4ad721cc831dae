use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storefront client account. Email is immutable once registered; the
/// profile endpoints only ever write name, phone, address and picture.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientAccount {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}
