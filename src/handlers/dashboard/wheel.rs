use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::middleware::response::{ApiResponse, ApiResult};

/// The discount wheel is a per-process switch; it was never persisted and
/// resets with the server.
static WHEEL_ENABLED: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Deserialize)]
pub struct WheelBody {
    pub enabled: bool,
}

/// GET /api/discounts/wheel - Current discount wheel state
pub async fn get_wheel() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "enabled": WHEEL_ENABLED.load(Ordering::Relaxed),
    })))
}

/// PUT /api/discounts/wheel - Enable or disable the discount wheel
pub async fn set_wheel(Json(body): Json<WheelBody>) -> ApiResult<Value> {
    WHEEL_ENABLED.store(body.enabled, Ordering::Relaxed);

    let message = if body.enabled {
        "Discount wheel enabled"
    } else {
        "Discount wheel disabled"
    };

    Ok(ApiResponse::success(json!({ "enabled": body.enabled })).with_message(message))
}
