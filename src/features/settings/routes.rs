use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::settings::handlers;
use crate::features::settings::services::SettingsService;

/// Public settings read used by every storefront page
pub fn routes(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route("/api/settings", get(handlers::get_public_settings))
        .with_state(service)
}

/// Settings management (basic auth applied by the caller)
pub fn admin_routes(service: Arc<SettingsService>) -> Router {
    Router::new()
        .route(
            "/api/admin/settings",
            get(handlers::get_admin_settings).put(handlers::update_settings),
        )
        .route(
            "/api/admin/settings/size-chart",
            put(handlers::update_size_chart),
        )
        .with_state(service)
}
