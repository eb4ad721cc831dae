use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::api::format::client_to_api_value;
use crate::database::manager::DatabaseManager;
use crate::database::repository;
use crate::error::ApiError;
use crate::middleware::auth::AuthClient;

/// GET /api/login/user-info - Profile of the logged-in client.
///
/// Historical shape: the profile screens read `user`, not `data`, so this
/// endpoint keeps its own envelope instead of `ApiResponse`.
pub async fn user_info(Extension(auth): Extension<AuthClient>) -> Result<Json<Value>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let client = repository::get_client(&pool, auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client account not found"))?;

    Ok(Json(json!({
        "success": true,
        "user": client_to_api_value(&client),
    })))
}
