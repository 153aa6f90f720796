use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{CreateProductDto, ProductFormDto};
use crate::features::products::inquiry::{self, sort_sizes, WhatsAppInquiry};
use crate::features::products::models::{
    CatalogStats, NewProduct, Product, ProductFilter, ProductImage, ProductWithImages,
};
use crate::features::products::search::search_products;
use crate::features::products::store::ProductStore;
use crate::features::settings::models::SiteSettings;
use crate::features::settings::SettingsService;
use crate::shared::constants::{MIN_GSM, PRICE_LIMIT, PRICE_SCALE, SIZES};

/// Trim, drop empties and remove duplicates, keeping the first occurrence
fn normalize_colors(colors: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(colors.len());
    for color in colors {
        let color = color.trim();
        if !color.is_empty() && !out.iter().any(|c| c == color) {
            out.push(color.to_string());
        }
    }
    out
}

fn required(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn check_price(price: Decimal, label: &str) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation(format!("{} cannot be negative", label)));
    }
    if price >= Decimal::from(PRICE_LIMIT) {
        return Err(AppError::Validation(format!(
            "{} must be below {}",
            label, PRICE_LIMIT
        )));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(AppError::Validation(format!(
            "{} can have at most {} decimal places",
            label, PRICE_SCALE
        )));
    }
    Ok(())
}

/// Apply catalog rules to submitted form data
pub fn normalize_product(form: ProductFormDto, settings: &SiteSettings) -> Result<NewProduct> {
    let article_name = required(&form.article_name, "Article name")?;
    let fabric_name = required(&form.fabric_name, "Fabric name")?;

    if form.gsm < MIN_GSM {
        return Err(AppError::Validation(format!(
            "GSM must be at least {}",
            MIN_GSM
        )));
    }

    let sizes: Vec<String> = form.sizes.iter().map(|s| s.trim().to_uppercase()).collect();
    if let Some(unknown) = sizes.iter().find(|s| !SIZES.contains(&s.as_str())) {
        return Err(AppError::Validation(format!(
            "Unknown size '{}', expected one of {}",
            unknown,
            SIZES.join(", ")
        )));
    }
    let sizes = sort_sizes(&sizes);
    if sizes.is_empty() {
        return Err(AppError::Validation(
            "Select at least one size".to_string(),
        ));
    }

    check_price(form.price_min, "Minimum price")?;
    if let Some(max) = form.price_max {
        check_price(max, "Maximum price")?;
    }
    if form.price_max.is_some_and(|max| max < form.price_min) {
        return Err(AppError::Validation(
            "Maximum price cannot be below the minimum price".to_string(),
        ));
    }

    let min_order = match form.min_order {
        Some(n) if n < 1 => {
            return Err(AppError::Validation(
                "Minimum order must be at least 1".to_string(),
            ))
        }
        Some(n) => n,
        None => settings.min_order(),
    };

    let category = form.category.trim().to_string();
    if !settings.categories.iter().any(|c| c.slug == category) {
        return Err(AppError::Validation(format!(
            "Unknown category '{}'",
            category
        )));
    }

    Ok(NewProduct {
        article_name,
        fabric_name,
        gsm: form.gsm,
        sizes,
        colors: normalize_colors(form.colors),
        price_min: form.price_min,
        price_max: form.price_max,
        min_order,
        description: form
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        category,
        tag: form.tag,
        is_active: form.is_active,
    })
}

/// Product catalog operations for the storefront and the admin panel
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    settings: Arc<SettingsService>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>, settings: Arc<SettingsService>) -> Self {
        Self { store, settings }
    }

    /// Active products, newest first. The free-text query is only honoured
    /// when search is enabled in the site settings.
    pub async fn list_storefront(
        &self,
        category: Option<String>,
        query: Option<&str>,
    ) -> Result<Vec<ProductWithImages>> {
        let category = category.filter(|c| !c.trim().is_empty());
        let products = self
            .store
            .query(&ProductFilter::storefront(category))
            .await?;

        match query {
            Some(q) if self.settings.load().await.search_enabled => {
                Ok(search_products(products, q))
            }
            _ => Ok(products),
        }
    }

    /// Active product by id; hidden products are reported as missing
    pub async fn get_storefront(&self, id: Uuid) -> Result<ProductWithImages> {
        self.store
            .get(id)
            .await?
            .filter(|p| p.product.is_active)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn inquiry(&self, id: Uuid) -> Result<WhatsAppInquiry> {
        let product = self.get_storefront(id).await?;
        let settings = self.settings.load().await;

        Ok(inquiry::build_inquiry(
            &product.product,
            &settings.whatsapp_primary,
            &settings.currency_symbol,
        ))
    }

    /// Every product including inactive ones; search always applies
    pub async fn list_admin(&self, query: Option<&str>) -> Result<Vec<ProductWithImages>> {
        let products = self.store.query(&ProductFilter::all()).await?;
        Ok(search_products(products, query.unwrap_or_default()))
    }

    pub async fn get_admin(&self, id: Uuid) -> Result<ProductWithImages> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductWithImages> {
        let settings = self.settings.load_strict().await?;
        let product = normalize_product(dto.product, &settings)?;

        let image_urls: Vec<String> = dto
            .image_urls
            .into_iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect();
        if image_urls.is_empty() {
            return Err(AppError::Validation(
                "Upload at least one image".to_string(),
            ));
        }

        let created = self.store.insert(product, &image_urls).await?;
        tracing::info!(
            "Product '{}' created in category '{}' ({})",
            created.product.article_name,
            created.product.category,
            created.product.id
        );
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, form: ProductFormDto) -> Result<ProductWithImages> {
        let settings = self.settings.load_strict().await?;
        let product = normalize_product(form, &settings)?;

        self.store
            .update(id, product)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
        tracing::info!("Product {} updated", id);

        self.get_admin(id).await
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Product> {
        let product = self
            .store
            .set_active(id, is_active)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
        tracing::info!("Product {} is_active={}", id, is_active);
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(format!("Product {} not found", id)));
        }
        tracing::info!("Product {} deleted", id);
        Ok(())
    }

    /// Append an image after the existing ones
    pub async fn add_image(&self, product_id: Uuid, image_url: &str) -> Result<ProductImage> {
        let product = self.get_admin(product_id).await?;
        let display_order = product
            .images
            .iter()
            .map(|i| i.display_order + 1)
            .max()
            .unwrap_or(0);

        self.store
            .add_image(product_id, image_url.trim(), display_order)
            .await
    }

    pub async fn delete_image(&self, product_id: Uuid, image_id: Uuid) -> Result<()> {
        if !self.store.delete_image(product_id, image_id).await? {
            return Err(AppError::NotFound(format!(
                "Image {} not found on product {}",
                image_id, product_id
            )));
        }
        Ok(())
    }

    pub async fn stats(&self) -> Result<CatalogStats> {
        let total_products = self.store.count(&ProductFilter::all()).await?;
        let active_products = self
            .store
            .count(&ProductFilter::storefront(None))
            .await?;
        let categories_in_use = self.store.count_by_category(false).await?.len() as i64;

        Ok(CatalogStats {
            total_products,
            active_products,
            categories_in_use,
        })
    }
}
