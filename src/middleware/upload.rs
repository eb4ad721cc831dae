use axum::extract::multipart::{Field, Multipart};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::config;
use crate::error::ApiError;
use crate::validation::ImageFile;

/// Read a single uploaded file out of a multipart field, refusing anything
/// that is not an image and cutting the transfer off at the configured cap
/// instead of buffering an arbitrarily large body.
pub async fn read_image_field(field: Field<'_>) -> Result<ImageFile, ApiError> {
    let file_name = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "upload".to_string());
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_default();

    if !content_type.starts_with("image/") {
        return Err(ApiError::bad_request("Only image files are allowed"));
    }

    let max_bytes = config::config().uploads.max_file_size_bytes;
    let mut bytes: Vec<u8> = Vec::new();

    let mut field = field;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed upload: {}", e)))?
    {
        if bytes.len() + chunk.len() > max_bytes {
            return Err(ApiError::bad_request("The image cannot exceed 5MB"));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(ImageFile {
        file_name,
        content_type,
        bytes,
    })
}

/// Write an uploaded image under the configured directory using a
/// content-hashed filename, and return the stored relative path.
pub async fn store_image(file: &ImageFile, subdir: &str) -> Result<String, ApiError> {
    let dir = Path::new(&config::config().uploads.dir).join(subdir);
    tokio::fs::create_dir_all(&dir).await.map_err(|e| {
        tracing::error!("Failed to create upload directory: {}", e);
        ApiError::internal_server_error("Failed to store the uploaded image")
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&file.bytes);
    let digest = hasher.finalize();
    let name = format!("{:x}.{}", digest, extension_for(&file.content_type));

    let path = dir.join(&name);
    tokio::fs::write(&path, &file.bytes).await.map_err(|e| {
        tracing::error!("Failed to write uploaded image: {}", e);
        ApiError::internal_server_error("Failed to store the uploaded image")
    })?;

    Ok(path.to_string_lossy().into_owned())
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}

/// Decode the product admin form out of a multipart body. Text fields keep
/// their raw string values; validation parses them afterwards.
pub async fn read_product_form(
    mut multipart: Multipart,
) -> Result<crate::validation::ProductInput, ApiError> {
    let mut input = crate::validation::ProductInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart request: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();
        match name.as_str() {
            "name" => input.name = read_text(field).await?,
            "description" => input.description = read_text(field).await?,
            "price" => input.price = read_text(field).await?,
            "stock" => input.stock = read_text(field).await?,
            "categoryId" => input.category_id = read_text(field).await?,
            "isPersonalizable" => input.is_personalizable = read_text(field).await? == "true",
            "details" => input.details = read_text(field).await?,
            "images" => input.image = Some(read_image_field(field).await?),
            other => {
                tracing::warn!("Ignoring unexpected multipart field: {}", other);
            }
        }
    }

    Ok(input)
}

async fn read_text(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart request: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_mapping_covers_accepted_types() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/webp"), "webp");
        assert_eq!(extension_for("image/gif"), "gif");
        assert_eq!(extension_for("application/pdf"), "bin");
    }
}
