use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::ClientError;

/// Thin wrapper over reqwest pinned to one API origin. All response
/// normalization happens here, once, so callers never branch on envelope
/// shapes themselves.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Check the content type, parse the body, and turn error statuses into
/// one descriptive message. The happy path returns the raw JSON value;
/// decoding into a shape is the caller's business.
pub async fn handle_response(response: reqwest::Response) -> Result<Value, ClientError> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("application/json") {
        let text = response.text().await.unwrap_or_default();
        tracing::error!("Non-JSON response ({}): {}", status, text);
        return Err(ClientError::NonJsonResponse {
            status: status.as_u16(),
            content_type,
        });
    }

    let body: Value = response.json().await?;

    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| body.get("message").and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Error {}", status.as_u16()));
        return Err(ClientError::Api(message));
    }

    Ok(body)
}

/// The two list envelope conventions the backend has shipped over time.
/// Decoded exactly once, here; every list caller gets a plain vector.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Wrapped {
        success: bool,
        data: Vec<T>,
        #[serde(default)]
        message: Option<String>,
    },
    Legacy(Vec<T>),
}

/// Resolve a list response body into items. Anything that is neither
/// envelope degrades to an empty list with a logged warning, keeping the
/// screen usable.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> Vec<T> {
    match serde_json::from_value::<ListEnvelope<T>>(body) {
        Ok(ListEnvelope::Wrapped { success: true, data, .. }) => data,
        Ok(ListEnvelope::Legacy(items)) => items,
        Ok(ListEnvelope::Wrapped { success: false, .. }) => {
            tracing::warn!("List response reported failure; treating as empty");
            Vec::new()
        }
        Err(_) => {
            tracing::warn!("Unexpected list response shape; treating as empty");
            Vec::new()
        }
    }
}

/// Unwrap a single-record response: `{success:true, data}` or the bare
/// record itself (the older convention).
pub fn decode_record(body: Value) -> Value {
    let wrapped = body.get("success").and_then(Value::as_bool) == Some(true);
    if wrapped {
        body.get("data").cloned().unwrap_or(body)
    } else {
        body
    }
}

/// Success message attached to a mutation response, when the backend sent one
pub fn response_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_and_legacy_lists_decode_identically() {
        let wrapped = json!({ "success": true, "data": [{"name": "a"}, {"name": "b"}] });
        let legacy = json!([{"name": "a"}, {"name": "b"}]);

        let from_wrapped: Vec<Value> = decode_list(wrapped);
        let from_legacy: Vec<Value> = decode_list(legacy);
        assert_eq!(from_wrapped, from_legacy);
        assert_eq!(from_wrapped.len(), 2);
    }

    #[test]
    fn unexpected_shapes_degrade_to_empty() {
        let shapes = [
            json!({ "success": true, "data": "not-a-list" }),
            json!({ "success": false, "data": [] }),
            json!({ "items": [1, 2, 3] }),
            json!(42),
        ];
        for shape in shapes {
            let items: Vec<Value> = decode_list(shape.clone());
            assert!(items.is_empty(), "shape {:?} should decode empty", shape);
        }
    }

    #[test]
    fn record_unwraps_the_success_envelope() {
        let wrapped = json!({ "success": true, "data": {"_id": "p1"}, "message": "ok" });
        assert_eq!(decode_record(wrapped)["_id"], "p1");

        let bare = json!({ "_id": "p2" });
        assert_eq!(decode_record(bare)["_id"], "p2");
    }

    #[test]
    fn message_extraction() {
        assert_eq!(
            response_message(&json!({ "message": "Product created successfully" })),
            Some("Product created successfully".to_string())
        );
        assert_eq!(response_message(&json!({})), None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ApiClient::new("http://localhost:4000/api/");
        assert_eq!(api.url("/products"), "http://localhost:4000/api/products");
    }
}
