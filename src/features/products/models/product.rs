use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Merchandising badge shown on a product card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "product_tag", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductTag {
    New,
    Hot,
    Bestseller,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub article_name: String,
    pub fabric_name: String,
    pub gsm: i32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    #[schema(value_type = String, example = "120.00")]
    pub price_min: Decimal,
    #[schema(value_type = Option<String>)]
    pub price_max: Option<Decimal>,
    pub min_order: i32,
    pub description: Option<String>,
    /// Category slug; resolved against the registry, not a foreign key
    pub category: String,
    pub tag: Option<ProductTag>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductImage {
    pub id: Uuid,
    pub product_id: Uuid,
    pub image_url: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Product joined with its images, ordered by `display_order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductWithImages {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
}

/// Listing criteria understood by every product store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub active_only: bool,
}

impl ProductFilter {
    pub fn storefront(category: Option<String>) -> Self {
        Self {
            category,
            active_only: true,
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_category(slug: &str) -> Self {
        Self {
            category: Some(slug.to_string()),
            active_only: false,
        }
    }
}

#[cfg(test)]
impl ProductFilter {
    /// In-memory equivalent of the store's WHERE clause
    pub fn matches(&self, product: &Product) -> bool {
        (!self.active_only || product.is_active)
            && self
                .category
                .as_deref()
                .is_none_or(|c| c == product.category)
    }
}

/// Normalized product fields ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub article_name: String,
    pub fabric_name: String,
    pub gsm: i32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub price_min: Decimal,
    pub price_max: Option<Decimal>,
    pub min_order: i32,
    pub description: Option<String>,
    pub category: String,
    pub tag: Option<ProductTag>,
    pub is_active: bool,
}

/// Product counts for the admin dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogStats {
    pub total_products: i64,
    pub active_products: i64,
    pub categories_in_use: i64,
}
