//! Client-side controllers for the storefront screens: API access with
//! response normalization, form staging, validation gating, and submission.
//! These are the moving parts the views bind to; they own all network I/O.

pub mod error;
pub mod http;
pub mod models;
pub mod preview;
pub mod products;
pub mod profile;
pub mod session;

pub use error::ClientError;
pub use http::ApiClient;

use std::path::Path;

use crate::validation::ImageFile;

/// Content type derived from a file extension, for staging local images
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => Some("image/jpeg"),
        Some("png") => Some("image/png"),
        Some("webp") => Some("image/webp"),
        Some("gif") => Some("image/gif"),
        _ => None,
    }
}

/// Read a local file into an upload-ready image
pub async fn load_image_file(path: &Path) -> Result<ImageFile, ClientError> {
    let content_type = mime_for_path(path)
        .ok_or_else(|| ClientError::Unsupported(format!("{} is not a supported image", path.display())))?
        .to_string();

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(ImageFile {
        file_name,
        content_type,
        bytes,
    })
}
