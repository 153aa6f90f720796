use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::products::models::ProductTag;

fn default_active() -> bool {
    true
}

/// Editable product fields shared by create and update
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductFormDto {
    #[validate(length(min = 1, max = 200, message = "Article name is required"))]
    pub article_name: String,

    #[validate(length(min = 1, max = 200, message = "Fabric name is required"))]
    pub fabric_name: String,

    #[validate(range(min = 100, message = "GSM must be at least 100"))]
    pub gsm: i32,

    #[validate(length(min = 1, message = "Select at least one size"))]
    pub sizes: Vec<String>,

    #[serde(default)]
    pub colors: Vec<String>,

    #[schema(value_type = String, example = "120")]
    pub price_min: Decimal,

    #[schema(value_type = Option<String>)]
    pub price_max: Option<Decimal>,

    /// Falls back to the `min_order_default` site setting when absent
    #[validate(range(min = 1, message = "Minimum order must be at least 1"))]
    pub min_order: Option<i32>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    pub tag: Option<ProductTag>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub product: ProductFormDto,

    /// Image URLs in display order
    #[validate(length(min = 1, message = "Upload at least one image"))]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetActiveDto {
    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddImageDto {
    #[validate(url(message = "image_url must be a URL"))]
    pub image_url: String,
}

/// Storefront listing query
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ProductListQuery {
    /// Category slug
    pub category: Option<String>,
    /// Free-text search (ignored when search is disabled)
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AdminProductQuery {
    pub q: Option<String>,
}
