use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::models::{
    NewProduct, Product, ProductFilter, ProductImage, ProductWithImages,
};

/// Persistence for products and their images.
///
/// Listings are ordered newest first. Images are returned in
/// `display_order`.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn query(&self, filter: &ProductFilter) -> Result<Vec<ProductWithImages>>;

    async fn count(&self, filter: &ProductFilter) -> Result<i64>;

    async fn get(&self, id: Uuid) -> Result<Option<ProductWithImages>>;

    /// Insert a product together with its initial images
    async fn insert(&self, product: NewProduct, image_urls: &[String])
        -> Result<ProductWithImages>;

    async fn update(&self, id: Uuid, product: NewProduct) -> Result<Option<Product>>;

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Product>>;

    /// Delete a product and (by cascade) its images
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn add_image(
        &self,
        product_id: Uuid,
        image_url: &str,
        display_order: i32,
    ) -> Result<ProductImage>;

    async fn delete_image(&self, product_id: Uuid, image_id: Uuid) -> Result<bool>;

    /// Number of products per category slug
    async fn count_by_category(&self, active_only: bool) -> Result<HashMap<String, i64>>;
}

const PRODUCT_COLUMNS: &str = "id, article_name, fabric_name, gsm, sizes, colors, price_min, \
     price_max, min_order, description, category, tag, is_active, created_at, updated_at";

const IMAGE_COLUMNS: &str = "id, product_id, image_url, display_order, created_at";

#[derive(Debug, FromRow)]
struct CategoryCountRow {
    category: String,
    count: i64,
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("{}: {:?}", context, e);
        AppError::Database(e)
    }
}

/// `products` / `product_images` backed store
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn images_for(&self, product_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<ProductImage>>> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let images = sqlx::query_as::<_, ProductImage>(&format!(
            "SELECT {} FROM product_images WHERE product_id = ANY($1) \
             ORDER BY display_order, created_at",
            IMAGE_COLUMNS
        ))
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load product images"))?;

        let mut grouped: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
        for image in images {
            grouped.entry(image.product_id).or_default().push(image);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn query(&self, filter: &ProductFilter) -> Result<Vec<ProductWithImages>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products \
             WHERE ($1::text IS NULL OR category = $1) AND (NOT $2 OR is_active) \
             ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        ))
        .bind(filter.category.as_deref())
        .bind(filter.active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list products"))?;

        let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
        let mut images = self.images_for(&ids).await?;

        Ok(products
            .into_iter()
            .map(|product| ProductWithImages {
                images: images.remove(&product.id).unwrap_or_default(),
                product,
            })
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products \
             WHERE ($1::text IS NULL OR category = $1) AND (NOT $2 OR is_active)",
        )
        .bind(filter.category.as_deref())
        .bind(filter.active_only)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count products"))
    }

    async fn get(&self, id: Uuid) -> Result<Option<ProductWithImages>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to get product"))?;

        let Some(product) = product else {
            return Ok(None);
        };

        let images = self
            .images_for(&[product.id])
            .await?
            .remove(&product.id)
            .unwrap_or_default();
        Ok(Some(ProductWithImages { product, images }))
    }

    async fn insert(
        &self,
        product: NewProduct,
        image_urls: &[String],
    ) -> Result<ProductWithImages> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (id, article_name, fabric_name, gsm, sizes, colors, price_min, \
             price_max, min_order, description, category, tag, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&product.article_name)
        .bind(&product.fabric_name)
        .bind(product.gsm)
        .bind(&product.sizes)
        .bind(&product.colors)
        .bind(product.price_min)
        .bind(product.price_max)
        .bind(product.min_order)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.tag)
        .bind(product.is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to insert product"))?;

        let mut images = Vec::with_capacity(image_urls.len());
        for (position, url) in image_urls.iter().enumerate() {
            let image = sqlx::query_as::<_, ProductImage>(&format!(
                "INSERT INTO product_images (id, product_id, image_url, display_order) \
                 VALUES ($1, $2, $3, $4) RETURNING {}",
                IMAGE_COLUMNS
            ))
            .bind(Uuid::now_v7())
            .bind(product.id)
            .bind(url)
            .bind(position as i32)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("Failed to insert product image"))?;
            images.push(image);
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit product insert"))?;

        Ok(ProductWithImages { product, images })
    }

    async fn update(&self, id: Uuid, product: NewProduct) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET article_name = $2, fabric_name = $3, gsm = $4, sizes = $5, \
             colors = $6, price_min = $7, price_max = $8, min_order = $9, description = $10, \
             category = $11, tag = $12, is_active = $13, updated_at = NOW() \
             WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .bind(&product.article_name)
        .bind(&product.fabric_name)
        .bind(product.gsm)
        .bind(&product.sizes)
        .bind(&product.colors)
        .bind(product.price_min)
        .bind(product.price_max)
        .bind(product.min_order)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.tag)
        .bind(product.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update product"))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Product>> {
        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to toggle product visibility"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete product"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_image(
        &self,
        product_id: Uuid,
        image_url: &str,
        display_order: i32,
    ) -> Result<ProductImage> {
        sqlx::query_as::<_, ProductImage>(&format!(
            "INSERT INTO product_images (id, product_id, image_url, display_order) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            IMAGE_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(product_id)
        .bind(image_url)
        .bind(display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to add product image"))
    }

    async fn delete_image(&self, product_id: Uuid, image_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM product_images WHERE id = $1 AND product_id = $2")
            .bind(image_id)
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete product image"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_by_category(&self, active_only: bool) -> Result<HashMap<String, i64>> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            "SELECT category, COUNT(*) AS count FROM products \
             WHERE NOT $1 OR is_active GROUP BY category",
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to count products by category"))?;

        Ok(rows.into_iter().map(|r| (r.category, r.count)).collect())
    }
}
