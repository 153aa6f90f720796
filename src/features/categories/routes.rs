use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/{slug}", get(handlers::get_category))
        .with_state(service)
}

/// Category management (basic auth applied by the caller)
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/admin/categories",
            get(handlers::admin_list_categories).post(handlers::create_category),
        )
        .route(
            "/api/admin/categories/{slug}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .route(
            "/api/admin/categories/{slug}/move",
            post(handlers::move_category),
        )
        .with_state(service)
}
