use axum::extract::Multipart;
use axum::Extension;
use serde_json::Value;

use crate::api::format::client_to_api_value;
use crate::database::manager::DatabaseManager;
use crate::database::repository;
use crate::error::ApiError;
use crate::middleware::auth::AuthClient;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::upload::{read_image_field, store_image};
use crate::validation::profile::validate_profile_picture;
use crate::validation::{validate_profile, ImageFile, ProfileInput};

/// PUT /api/clients/update-profile - Update the logged-in client's
/// personal information and, optionally, their profile picture.
pub async fn update_profile(
    Extension(auth): Extension<AuthClient>,
    mut multipart: Multipart,
) -> ApiResult<Value> {
    let mut input = ProfileInput::default();
    let mut picture: Option<ImageFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart request: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        match name.as_str() {
            "fullName" => input.full_name = read_text(field).await?,
            "phone" => input.phone = read_text(field).await?,
            "address" => input.address = read_text(field).await?,
            "profilePicture" => picture = Some(read_image_field(field).await?),
            other => {
                tracing::warn!("Ignoring unexpected multipart field: {}", other);
            }
        }
    }

    let mut report = validate_profile(&input);
    report.record("profilePicture", validate_profile_picture(picture.as_ref()));
    report.into_result()?;

    let stored_picture = match picture.as_ref() {
        Some(file) => Some(store_image(file, "profile_pictures").await?),
        None => None,
    };

    let pool = DatabaseManager::pool().await?;
    let client = repository::update_client_profile(
        &pool,
        auth.id,
        input.full_name.trim(),
        input.phone.trim(),
        input.address.trim(),
        stored_picture.as_deref(),
    )
    .await?;

    Ok(ApiResponse::success(client_to_api_value(&client))
        .with_message("Profile updated successfully"))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart request: {}", e)))
}
