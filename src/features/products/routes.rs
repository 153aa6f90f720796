use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::products::handlers;
use crate::features::products::services::ProductService;

/// Storefront product routes (public)
pub fn routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/{id}", get(handlers::get_product))
        .route("/api/products/{id}/inquiry", get(handlers::get_inquiry))
        .with_state(service)
}

/// Product management (basic auth applied by the caller)
pub fn admin_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/admin/stats", get(handlers::get_stats))
        .route(
            "/api/admin/products",
            get(handlers::admin_list_products).post(handlers::create_product),
        )
        .route(
            "/api/admin/products/{id}",
            get(handlers::admin_get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/api/admin/products/{id}/active",
            patch(handlers::set_product_active),
        )
        .route(
            "/api/admin/products/{id}/images",
            post(handlers::add_product_image),
        )
        .route(
            "/api/admin/products/{id}/images/{image_id}",
            delete(handlers::delete_product_image),
        )
        .with_state(service)
}
