use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// Largest accepted import upload
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // STOREFRONT (PUBLIC)
        // ========================================
        .route("/api/category", get(handlers::a001_category::list_all))
        .route("/api/product/:id", get(handlers::a002_product::get_by_id))
        .route("/api/u502/catalog", get(handlers::usecases::u502_browse))
        .merge(admin_routes())
}

/// Operator routes, all behind `require_admin`
fn admin_routes() -> Router {
    Router::new()
        .route("/api/product", get(handlers::a002_product::list_all))
        .route("/api/product/search", get(handlers::a002_product::search))
        .route(
            "/api/u501/import",
            post(handlers::usecases::u501_import).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route_layer(middleware::from_fn(
            system::auth::middleware::require_admin,
        ))
}
