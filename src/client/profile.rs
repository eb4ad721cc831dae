use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::validation::product::MAX_IMAGE_BYTES;
use crate::validation::profile::{
    capitalize_words, format_phone_input, validate_profile_picture, ALLOWED_PICTURE_TYPES,
};
use crate::validation::{validate_profile, ImageFile, ProfileInput};

use super::error::ClientError;
use super::http::{self, ApiClient};
use super::mime_for_path;
use super::models::UserProfile;
use super::preview::PreviewSlot;
use super::session::SessionProvider;

/// Editable profile fields. Email rides along for display only and is
/// never submitted.
#[derive(Debug, Clone, Default)]
pub struct ProfileFormData {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FullName,
    Phone,
    Address,
}

impl ProfileField {
    fn key(&self) -> &'static str {
        match self {
            ProfileField::FullName => "fullName",
            ProfileField::Phone => "phone",
            ProfileField::Address => "address",
        }
    }
}

/// A picture chosen for upload; bytes are read at submit time, while the
/// preview decode runs independently.
#[derive(Debug, Clone)]
struct StagedPicture {
    path: PathBuf,
    content_type: String,
}

/// Result the view renders after a submit attempt
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub success: bool,
    pub message: String,
    pub data: Option<Value>,
}

impl SubmitOutcome {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Controller behind the profile edit modal: staging, per-field input
/// transforms, picture selection with an asynchronous cancellable preview,
/// and the multipart submit through the injected session.
pub struct ProfileForm {
    api: ApiClient,
    session: Arc<dyn SessionProvider>,
    pub data: ProfileFormData,
    /// Stored picture URL, shown until a new selection produces a preview
    pub stored_picture: Option<String>,
    pub preview: PreviewSlot,
    pub errors: HashMap<String, String>,
    pub is_loading: bool,
    pub success: bool,
    staged_picture: Option<StagedPicture>,
}

impl ProfileForm {
    pub fn new(api: ApiClient, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            api,
            session,
            data: ProfileFormData::default(),
            stored_picture: None,
            preview: PreviewSlot::new(),
            errors: HashMap::new(),
            is_loading: false,
            success: false,
            staged_picture: None,
        }
    }

    /// Seed the form from the fetched profile
    pub fn initialize(&mut self, user: &UserProfile) {
        self.data = ProfileFormData {
            full_name: user.name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
            email: user.email.clone(),
        };
        self.stored_picture = user.profile_picture.clone();
        self.staged_picture = None;
        self.preview.reset();
        self.errors.clear();
        self.success = false;
    }

    /// Apply a keystroke to a field, running its input transform and
    /// clearing that field's error.
    pub fn handle_input_change(&mut self, field: ProfileField, value: &str) {
        let processed = match field {
            ProfileField::Phone => format_phone_input(value),
            ProfileField::FullName => capitalize_words(value),
            ProfileField::Address => value.to_string(),
        };

        match field {
            ProfileField::FullName => self.data.full_name = processed,
            ProfileField::Phone => self.data.phone = processed,
            ProfileField::Address => self.data.address = processed,
        }

        self.errors.remove(field.key());
        self.success = false;
    }

    /// Stage a new profile picture. Type and size are checked up front;
    /// the preview decode runs asynchronously and is invalidated by any
    /// later selection or reset.
    pub async fn select_image(&mut self, path: &Path) {
        let content_type = match mime_for_path(path) {
            Some(mime) if ALLOWED_PICTURE_TYPES.contains(&mime) => mime,
            _ => {
                self.errors.insert(
                    "profilePicture".to_string(),
                    "Only JPG, PNG or WEBP images are allowed".to_string(),
                );
                return;
            }
        };

        let size = match tokio::fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(e) => {
                tracing::warn!("Could not stat {}: {}", path.display(), e);
                self.errors.insert(
                    "profilePicture".to_string(),
                    "The selected file could not be read".to_string(),
                );
                return;
            }
        };
        if size > MAX_IMAGE_BYTES as u64 {
            self.errors.insert(
                "profilePicture".to_string(),
                "The image cannot exceed 5MB".to_string(),
            );
            return;
        }

        self.errors.remove("profilePicture");
        self.staged_picture = Some(StagedPicture {
            path: path.to_path_buf(),
            content_type: content_type.to_string(),
        });
        self.preview.start(path.to_path_buf(), content_type.to_string());
        self.success = false;
    }

    /// Validate and submit the profile. Never panics or propagates; every
    /// failure becomes an outcome the view can render, with `general`
    /// carrying the cross-field message.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let input = ProfileInput {
            full_name: self.data.full_name.clone(),
            phone: self.data.phone.clone(),
            address: self.data.address.clone(),
        };
        let report = validate_profile(&input);
        if !report.is_valid() {
            self.errors = report.errors;
            return SubmitOutcome::failure("Please correct the errors in the form");
        }

        self.is_loading = true;
        self.errors.clear();
        let result = self.submit_inner().await;
        self.is_loading = false;

        match result {
            Ok((data, message)) => {
                self.success = true;
                if let Err(e) = self.session.refresh_user_info().await {
                    tracing::warn!("User info refresh after profile update failed: {}", e);
                }
                SubmitOutcome {
                    success: true,
                    message,
                    data: Some(data),
                }
            }
            Err(ClientError::Api(message)) => {
                self.errors.insert("general".to_string(), message.clone());
                SubmitOutcome::failure(message)
            }
            Err(e) => {
                tracing::error!("Profile update failed: {}", e);
                let message = "Connection error. Please try again.";
                self.errors.insert("general".to_string(), message.to_string());
                SubmitOutcome::failure(message)
            }
        }
    }

    async fn submit_inner(&self) -> Result<(Value, String), ClientError> {
        let mut form = Form::new()
            .text("fullName", self.data.full_name.trim().to_string())
            .text("phone", self.data.phone.trim().to_string())
            .text("address", self.data.address.trim().to_string());

        if let Some(staged) = &self.staged_picture {
            let bytes = tokio::fs::read(&staged.path).await?;
            let image = ImageFile {
                file_name: staged
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "picture".to_string()),
                content_type: staged.content_type.clone(),
                bytes,
            };
            // The file may have changed on disk since selection
            let check = validate_profile_picture(Some(&image));
            if let Some(error) = check.error {
                return Err(ClientError::Api(error));
            }

            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.content_type)
                .map_err(|e| ClientError::Unsupported(format!("Unsupported image type: {}", e)))?;
            form = form.part("profilePicture", part);
        }

        let mut request = self
            .api
            .http()
            .put(self.api.url("/clients/update-profile"))
            .multipart(form);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body = http::handle_response(response).await?;
        let message = http::response_message(&body)
            .unwrap_or_else(|| "Profile updated successfully".to_string());

        Ok((http::decode_record(body), message))
    }

    /// Clear the form, drop any staged picture, and invalidate an
    /// in-flight preview decode.
    pub fn reset(&mut self) {
        self.data = ProfileFormData::default();
        self.stored_picture = None;
        self.staged_picture = None;
        self.preview.reset();
        self.errors.clear();
        self.success = false;
        self.is_loading = false;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }
}

/// GET /api/login/user-info - the logged-in client's profile. The endpoint
/// answers `{success, user}`, not the data envelope.
pub async fn fetch_user_profile(
    api: &ApiClient,
    session: &dyn SessionProvider,
) -> Result<UserProfile, ClientError> {
    let mut request = api.http().get(api.url("/login/user-info"));
    if let Some(token) = session.token() {
        request = request.bearer_auth(token);
    }

    let body = http::handle_response(request.send().await?).await?;

    if body.get("success").and_then(Value::as_bool) == Some(true) {
        if let Some(user) = body.get("user") {
            return serde_json::from_value(user.clone())
                .map_err(|e| ClientError::Api(format!("Could not read the user profile: {}", e)));
        }
    }

    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Could not load the user profile");
    Err(ClientError::Api(message.to_string()))
}

/// Year the account was created, for the "member since" badge
pub fn member_since(created_at: Option<&str>) -> String {
    use chrono::Datelike;

    created_at
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.year().to_string())
        .unwrap_or_else(|| "Date not available".to_string())
}

/// Initials fallback when no profile picture is set
pub fn initials(full_name: &str) -> String {
    let names: Vec<&str> = full_name.split_whitespace().collect();
    match names.as_slice() {
        [] => "U".to_string(),
        [only] => only.chars().next().map(first_upper).unwrap_or_else(|| "U".to_string()),
        [first, second, ..] => {
            let mut out = String::new();
            if let Some(c) = first.chars().next() {
                out.push_str(&first_upper(c));
            }
            if let Some(c) = second.chars().next() {
                out.push_str(&first_upper(c));
            }
            out
        }
    }
}

fn first_upper(c: char) -> String {
    c.to_uppercase().to_string()
}

/// Whether a stored profile-picture reference is a usable URL
pub fn is_valid_image_url(url: &str) -> bool {
    url::Url::parse(url).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::session::TokenSession;

    fn form() -> ProfileForm {
        ProfileForm::new(
            ApiClient::new("http://127.0.0.1:9/api"),
            Arc::new(TokenSession::new(None)),
        )
    }

    fn user() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "María José".into(),
            email: "maria@example.com".into(),
            phone: Some("7123-4567".into()),
            address: Some("Colonia Escalón, #42".into()),
            profile_picture: None,
            created_at: Some("2022-03-04T10:00:00Z".into()),
        }
    }

    #[test]
    fn initialize_seeds_fields_and_keeps_email_display_only() {
        let mut form = form();
        form.initialize(&user());
        assert_eq!(form.data.full_name, "María José");
        assert_eq!(form.data.phone, "7123-4567");
        assert_eq!(form.data.email, "maria@example.com");
        assert!(form.errors.is_empty());
    }

    #[test]
    fn phone_keystrokes_run_the_transform() {
        let mut form = form();
        form.handle_input_change(ProfileField::Phone, "71234567");
        assert_eq!(form.data.phone, "7123-4567");

        form.handle_input_change(ProfileField::FullName, "john doe");
        assert_eq!(form.data.full_name, "John Doe");
    }

    #[tokio::test]
    async fn submit_with_invalid_fields_sets_errors_and_skips_network() {
        let mut form = form();
        form.data.full_name = "A".into();
        form.data.phone = "12".into();
        form.data.address = "short".into();

        let outcome = form.submit().await;
        assert!(!outcome.success);
        assert!(form.errors.contains_key("fullName"));
        assert!(form.errors.contains_key("phone"));
        assert!(form.errors.contains_key("address"));
        assert!(!form.is_loading);
    }

    #[tokio::test]
    async fn selecting_a_non_image_sets_a_field_error() {
        let mut form = form();
        form.select_image(Path::new("/tmp/notes.txt")).await;
        assert_eq!(
            form.errors.get("profilePicture").map(String::as_str),
            Some("Only JPG, PNG or WEBP images are allowed")
        );
    }

    #[tokio::test]
    async fn oversized_image_cites_the_limit_and_stages_nothing() {
        let path = std::env::temp_dir().join(format!(
            "storefront-profile-{}-big.png",
            std::process::id()
        ));
        tokio::fs::write(&path, vec![0u8; 6 * 1024 * 1024]).await.unwrap();

        let mut form = form();
        form.select_image(&path).await;
        assert_eq!(
            form.errors.get("profilePicture").map(String::as_str),
            Some("The image cannot exceed 5MB")
        );
        assert!(form.staged_picture.is_none());
        assert!(form.preview.get().is_none());

        let _ = tokio::fs::remove_file(path).await;
    }

    #[test]
    fn member_since_formats_the_year() {
        assert_eq!(member_since(Some("2022-03-04T10:00:00Z")), "2022");
        assert_eq!(member_since(None), "Date not available");
        assert_eq!(member_since(Some("garbage")), "Date not available");
    }

    #[test]
    fn initials_fall_back_to_u() {
        assert_eq!(initials("María José"), "MJ");
        assert_eq!(initials("cher"), "C");
        assert_eq!(initials("   "), "U");
    }

    #[test]
    fn image_url_validation() {
        assert!(is_valid_image_url("https://cdn.example.com/pic.png"));
        assert!(!is_valid_image_url("not a url"));
    }
}
