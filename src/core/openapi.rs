use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, models as categories_models,
};
use crate::features::products::{
    dtos as products_dtos, handlers as products_handlers, inquiry, models as products_models,
};
use crate::features::settings::{
    dtos as settings_dtos, handlers as settings_handlers, models as settings_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Settings (public)
        settings_handlers::get_public_settings,
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::get_category,
        // Products (public)
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::get_inquiry,
        // Admin
        products_handlers::get_stats,
        products_handlers::admin_list_products,
        products_handlers::admin_get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        products_handlers::set_product_active,
        products_handlers::add_product_image,
        products_handlers::delete_product_image,
        categories_handlers::admin_list_categories,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        categories_handlers::move_category,
        settings_handlers::get_admin_settings,
        settings_handlers::update_settings,
        settings_handlers::update_size_chart,
    ),
    components(
        schemas(
            Meta,
            // Settings
            settings_models::SiteSettings,
            settings_models::SizeChart,
            settings_models::SizeMeasurements,
            settings_dtos::PublicSettingsDto,
            settings_dtos::SizeChartRowDto,
            settings_dtos::UpdateSettingsDto,
            ApiResponse<settings_dtos::PublicSettingsDto>,
            ApiResponse<settings_models::SiteSettings>,
            ApiResponse<settings_models::SizeChart>,
            // Categories
            categories_models::Category,
            categories_models::MoveDirection,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::MoveCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<categories_models::Category>,
            ApiResponse<Vec<categories_models::Category>>,
            // Products
            products_models::Product,
            products_models::ProductImage,
            products_models::ProductTag,
            products_models::ProductWithImages,
            products_models::CatalogStats,
            products_dtos::ProductFormDto,
            products_dtos::CreateProductDto,
            products_dtos::SetActiveDto,
            products_dtos::AddImageDto,
            inquiry::WhatsAppInquiry,
            ApiResponse<Vec<products_models::ProductWithImages>>,
            ApiResponse<products_models::ProductWithImages>,
            ApiResponse<products_models::Product>,
            ApiResponse<products_models::ProductImage>,
            ApiResponse<products_models::CatalogStats>,
            ApiResponse<inquiry::WhatsAppInquiry>,
        )
    ),
    tags(
        (name = "settings", description = "Site settings (public)"),
        (name = "categories", description = "Product categories (public)"),
        (name = "products", description = "Product catalog and WhatsApp enquiries (public)"),
        (name = "admin", description = "Catalog management (basic auth)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "TopWhite Catalog API",
        version = "0.1.0",
        description = "Wholesale catalog storefront and admin API",
    )
)]
pub struct ApiDoc;

/// Adds the HTTP basic security scheme used by admin routes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
