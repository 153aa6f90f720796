//! Service wiring and router assembly shared by the binary and HTTP tests.

use std::sync::Arc;

use axum::{http::StatusCode, middleware::from_fn, routing::get, Router};

use crate::core::middleware;
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::products::{routes as products_routes, ProductService, ProductStore};
use crate::features::settings::{routes as settings_routes, SettingsService, SettingsStore};

/// Application services, built once over the two stores
#[derive(Clone)]
pub struct Services {
    pub settings: Arc<SettingsService>,
    pub categories: Arc<CategoryService>,
    pub products: Arc<ProductService>,
}

impl Services {
    pub fn new(product_store: Arc<dyn ProductStore>, settings_store: Arc<dyn SettingsStore>) -> Self {
        let settings = Arc::new(SettingsService::new(settings_store));
        let categories = Arc::new(CategoryService::new(
            Arc::clone(&settings),
            Arc::clone(&product_store),
        ));
        let products = Arc::new(ProductService::new(product_store, Arc::clone(&settings)));

        Self {
            settings,
            categories,
            products,
        }
    }
}

// Simple health check endpoint (no auth required)
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Public storefront routes plus the basic-auth protected admin API
pub fn router(services: &Services, admin_credentials: String) -> Router {
    let admin_routes = Router::new()
        .merge(products_routes::admin_routes(Arc::clone(&services.products)))
        .merge(categories_routes::admin_routes(Arc::clone(
            &services.categories,
        )))
        .merge(settings_routes::admin_routes(Arc::clone(&services.settings)))
        .route_layer(from_fn(middleware::basic_auth_middleware(
            Arc::new(admin_credentials),
            "Catalog Admin",
        )));

    let public_routes = Router::new()
        .merge(settings_routes::routes(Arc::clone(&services.settings)))
        .merge(categories_routes::routes(Arc::clone(&services.categories)))
        .merge(products_routes::routes(Arc::clone(&services.products)));

    Router::new()
        .route("/health", get(health_check))
        .merge(public_routes)
        .merge(admin_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_product, InMemoryProductStore, InMemorySettingsStore};
    use axum::http::{header, HeaderValue};
    use axum_test::TestServer;
    use base64::prelude::*;
    use serde_json::{json, Value};

    const CREDENTIALS: &str = "owner:secret";

    struct Harness {
        server: TestServer,
        products: Arc<InMemoryProductStore>,
        settings: Arc<InMemorySettingsStore>,
    }

    fn harness(products: Vec<crate::features::products::models::ProductWithImages>) -> Harness {
        let product_store = Arc::new(InMemoryProductStore::with_products(products));
        let settings_store = Arc::new(InMemorySettingsStore::default());
        let services = Services::new(product_store.clone(), settings_store.clone());
        let server = TestServer::new(router(&services, CREDENTIALS.to_string())).unwrap();

        Harness {
            server,
            products: product_store,
            settings: settings_store,
        }
    }

    fn auth() -> HeaderValue {
        HeaderValue::from_str(&format!("Basic {}", BASE64_STANDARD.encode(CREDENTIALS))).unwrap()
    }

    fn slugs(body: &Value) -> Vec<String> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["slug"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness(vec![]);
        h.server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_public_settings_fall_back_when_backend_down() {
        let h = harness(vec![]);
        h.settings.set_unavailable(true);

        let response = h.server.get("/api/settings").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["min_order_default"], "50");
        assert_eq!(body["data"]["categories"].as_array().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_admin_requires_credentials() {
        let h = harness(vec![]);

        let response = h.server.get("/api/admin/categories").await;
        response.assert_status_unauthorized();
        assert!(response
            .header(header::WWW_AUTHENTICATE)
            .to_str()
            .unwrap()
            .starts_with("Basic"));

        h.server
            .get("/api/admin/categories")
            .add_header(header::AUTHORIZATION, auth())
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_category_lifecycle_over_http() {
        let h = harness(vec![]);

        let response = h
            .server
            .post("/api/admin/categories")
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({ "name": "Oversized Tees" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["slug"], "oversizedtees");

        h.server
            .post("/api/admin/categories")
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({ "name": "Oversized", "slug": "oversizedtees" }))
            .await
            .assert_status(StatusCode::CONFLICT);

        h.server
            .put("/api/admin/categories/plain")
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({ "active": false }))
            .await
            .assert_status_ok();

        h.server
            .post("/api/admin/categories/oversizedtees/move")
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({ "direction": "up" }))
            .await
            .assert_status_ok();

        let body: Value = h.server.get("/api/categories").await.json();
        let listed = slugs(&body);
        assert_eq!(listed.len(), 9);
        assert!(!listed.contains(&"plain".to_string()));
        assert_eq!(listed[7], "oversizedtees");
        assert_eq!(listed[8], "downshoulder");

        h.server
            .get("/api/categories/plain")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_delete_in_use_category_is_conflict() {
        let products = (0..5)
            .map(|i| sample_product(&format!("Printed {}", i), "printed"))
            .collect();
        let h = harness(products);

        let response = h
            .server
            .delete("/api/admin/categories/printed")
            .add_header(header::AUTHORIZATION, auth())
            .await;
        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("5 product(s)"));
        assert_eq!(body["meta"]["total"], 5);
        assert_eq!(h.settings.upsert_count(), 0);
    }

    #[tokio::test]
    async fn test_product_create_and_storefront_search() {
        let h = harness(vec![sample_product("Everyday Tee", "plain")]);

        let response = h
            .server
            .post("/api/admin/products")
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({
                "article_name": "Royal Polo",
                "fabric_name": "Pique",
                "gsm": 220,
                "sizes": ["XL", "M"],
                "colors": ["Navy"],
                "price_min": "120",
                "price_max": "150",
                "category": "collar",
                "image_urls": ["https://cdn.example.com/polo.jpg"]
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["sizes"], json!(["M", "XL"]));
        assert_eq!(body["data"]["min_order"], 50);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        // Search disabled by default: q is ignored
        let body: Value = h.server.get("/api/products?q=polo").await.json();
        assert_eq!(body["meta"]["total"], 2);

        h.server
            .put("/api/admin/settings")
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({ "search_enabled": true }))
            .await
            .assert_status_ok();

        let body: Value = h.server.get("/api/products?q=polo").await.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["article_name"], "Royal Polo");

        let body: Value = h
            .server
            .get(&format!("/api/products/{}/inquiry", id))
            .await
            .json();
        assert!(body["data"]["url"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/"));
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("Price: \u{20b9}120 - \u{20b9}150"));
    }

    #[tokio::test]
    async fn test_product_validation_errors() {
        let h = harness(vec![]);

        let response = h
            .server
            .post("/api/admin/products")
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({
                "article_name": "Thin Tee",
                "fabric_name": "Cotton",
                "gsm": 90,
                "sizes": ["M"],
                "price_min": 100,
                "category": "plain",
                "image_urls": ["https://cdn.example.com/thin.jpg"]
            }))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));

        h.server
            .post("/api/admin/products")
            .add_header(header::AUTHORIZATION, auth())
            .text("{not json")
            .content_type("application/json")
            .await
            .assert_status_bad_request();

        assert!(h.products.all().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_price_is_bad_request() {
        let h = harness(vec![]);

        let response = h
            .server
            .post("/api/admin/products")
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({
                "article_name": "Gold Tee",
                "fabric_name": "Cotton",
                "gsm": 180,
                "sizes": ["M"],
                "price_min": "100000000000",
                "category": "plain",
                "image_urls": ["https://cdn.example.com/gold.jpg"]
            }))
            .await;
        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("Minimum price"));
        assert!(h.products.all().is_empty());
    }

    #[tokio::test]
    async fn test_hidden_product_not_on_storefront() {
        let product = sample_product("Everyday Tee", "plain");
        let id = product.product.id;
        let h = harness(vec![product]);

        h.server
            .patch(&format!("/api/admin/products/{}/active", id))
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({ "is_active": false }))
            .await
            .assert_status_ok();

        h.server
            .get(&format!("/api/products/{}", id))
            .await
            .assert_status_not_found();

        let body: Value = h
            .server
            .get("/api/admin/stats")
            .add_header(header::AUTHORIZATION, auth())
            .await
            .json();
        assert_eq!(body["data"]["total_products"], 1);
        assert_eq!(body["data"]["active_products"], 0);
    }

    #[tokio::test]
    async fn test_admin_write_fails_when_backend_down() {
        let h = harness(vec![]);
        h.settings.set_unavailable(true);

        h.server
            .post("/api/admin/categories")
            .add_header(header::AUTHORIZATION, auth())
            .json(&json!({ "name": "Denim" }))
            .await
            .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }
}
