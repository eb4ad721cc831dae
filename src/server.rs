use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::auth::verify_token_middleware;

/// Build the full route table. Kept out of `main` so integration tests can
/// drive the router in-process.
pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // API surface
        .merge(product_routes())
        .merge(category_routes())
        .merge(client_routes())
        .merge(auth_routes())
        .merge(dashboard_routes())
        .merge(order_routes())
        // Global middleware
        .layer(DefaultBodyLimit::max(
            crate::config::config().api.max_request_size_bytes,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn product_routes() -> Router {
    use axum::routing::put;
    use crate::handlers::products;

    Router::new()
        .route(
            "/api/products",
            get(products::list).post(products::create),
        )
        .route(
            "/api/products/:id",
            put(products::update).delete(products::delete),
        )
}

fn category_routes() -> Router {
    use crate::handlers::categories;

    Router::new().route("/api/categories", get(categories::list))
}

fn client_routes() -> Router {
    use axum::routing::put;
    use crate::handlers::clients;

    Router::new()
        .route("/api/clients/newClientsStats", get(clients::new_clients_stats))
        .route("/api/clients/total", get(clients::total_clients))
        .route("/api/clients/detailedStats", get(clients::detailed_stats))
        // Profile updates act on the logged-in client
        .route(
            "/api/clients/update-profile",
            put(clients::update_profile)
                .route_layer(axum::middleware::from_fn(verify_token_middleware)),
        )
}

fn auth_routes() -> Router {
    use crate::handlers::auth;

    Router::new().route(
        "/api/login/user-info",
        get(auth::user_info).route_layer(axum::middleware::from_fn(verify_token_middleware)),
    )
}

fn dashboard_routes() -> Router {
    use axum::routing::put;
    use crate::handlers::dashboard;

    Router::new()
        .route("/api/dashboard/summary", get(dashboard::summary))
        .route("/api/dashboard/bestSellers", get(dashboard::best_sellers))
        .route("/api/dashboard/topRated", get(dashboard::top_rated))
        .route(
            "/api/discounts/wheel",
            get(dashboard::get_wheel).put(dashboard::set_wheel),
        )
}

fn order_routes() -> Router {
    use crate::handlers::orders;

    Router::new().route("/api/orders/:id/summary", get(orders::summary))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Storefront API (Rust)",
            "version": version,
            "description": "Storefront backend API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "products": "/api/products[/:id] (public catalog admin)",
                "categories": "/api/categories (public)",
                "clients": "/api/clients/* (stats public, update-profile protected)",
                "login": "/api/login/user-info (protected)",
                "dashboard": "/api/dashboard/* (public widgets)",
                "discounts": "/api/discounts/wheel (public toggle)",
                "orders": "/api/orders/:id/summary (public)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
