//! In-memory store fakes and fixtures shared by unit and HTTP tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::models::{
    NewProduct, Product, ProductFilter, ProductImage, ProductWithImages,
};
use crate::features::products::store::ProductStore;
use crate::features::settings::store::SettingsStore;

fn unavailable() -> AppError {
    AppError::BackendUnavailable("in-memory store switched off".to_string())
}

/// Active product with one image, created "now"
pub fn sample_product(article_name: &str, category: &str) -> ProductWithImages {
    let id = Uuid::new_v4();
    let now = Utc::now();
    ProductWithImages {
        product: Product {
            id,
            article_name: article_name.to_string(),
            fabric_name: "Cotton".to_string(),
            gsm: 180,
            sizes: vec!["M".to_string(), "L".to_string()],
            colors: vec!["White".to_string()],
            price_min: Decimal::new(120, 0),
            price_max: Some(Decimal::new(150, 0)),
            min_order: 50,
            description: None,
            category: category.to_string(),
            tag: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        },
        images: vec![ProductImage {
            id: Uuid::new_v4(),
            product_id: id,
            image_url: format!("https://cdn.example.com/{}.jpg", id),
            display_order: 0,
            created_at: now,
        }],
    }
}

#[derive(Default)]
pub struct InMemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
    upserts: AtomicUsize,
    down: AtomicBool,
}

impl InMemorySettingsStore {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut values = store.values.write().unwrap();
            for (k, v) in pairs {
                values.insert(k.to_string(), v.to_string());
            }
        }
        store
    }

    pub fn set_unavailable(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.values.read().unwrap().clone()
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get_all(&self) -> Result<HashMap<String, String>> {
        if self.down.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.snapshot())
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<ProductWithImages>>,
    down: AtomicBool,
}

impl InMemoryProductStore {
    /// Seed products; later entries are treated as newer
    pub fn with_products(products: Vec<ProductWithImages>) -> Self {
        let base = Utc::now() - Duration::hours(1);
        let products = products
            .into_iter()
            .enumerate()
            .map(|(i, mut p)| {
                p.product.created_at = base + Duration::seconds(i as i64);
                p
            })
            .collect();
        Self {
            products: RwLock::new(products),
            down: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<ProductWithImages> {
        self.products.read().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.down.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }

    fn modify<T>(&self, id: Uuid, f: impl FnOnce(&mut ProductWithImages) -> T) -> Option<T> {
        let mut products = self.products.write().unwrap();
        products.iter_mut().find(|p| p.product.id == id).map(f)
    }
}

fn apply(product: &mut Product, new: NewProduct) {
    product.article_name = new.article_name;
    product.fabric_name = new.fabric_name;
    product.gsm = new.gsm;
    product.sizes = new.sizes;
    product.colors = new.colors;
    product.price_min = new.price_min;
    product.price_max = new.price_max;
    product.min_order = new.min_order;
    product.description = new.description;
    product.category = new.category;
    product.tag = new.tag;
    product.is_active = new.is_active;
    product.updated_at = Utc::now();
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn query(&self, filter: &ProductFilter) -> Result<Vec<ProductWithImages>> {
        self.check()?;
        let mut products: Vec<ProductWithImages> = self
            .all()
            .into_iter()
            .filter(|p| filter.matches(&p.product))
            .collect();
        products.sort_by(|a, b| b.product.created_at.cmp(&a.product.created_at));
        Ok(products)
    }

    async fn count(&self, filter: &ProductFilter) -> Result<i64> {
        self.check()?;
        Ok(self
            .all()
            .iter()
            .filter(|p| filter.matches(&p.product))
            .count() as i64)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ProductWithImages>> {
        self.check()?;
        Ok(self.all().into_iter().find(|p| p.product.id == id))
    }

    async fn insert(
        &self,
        product: NewProduct,
        image_urls: &[String],
    ) -> Result<ProductWithImages> {
        self.check()?;
        let mut created = sample_product(&product.article_name, &product.category);
        apply(&mut created.product, product);
        created.images = image_urls
            .iter()
            .enumerate()
            .map(|(i, url)| ProductImage {
                id: Uuid::new_v4(),
                product_id: created.product.id,
                image_url: url.clone(),
                display_order: i as i32,
                created_at: Utc::now(),
            })
            .collect();

        self.products.write().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, product: NewProduct) -> Result<Option<Product>> {
        self.check()?;
        Ok(self.modify(id, |p| {
            apply(&mut p.product, product);
            p.product.clone()
        }))
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Option<Product>> {
        self.check()?;
        Ok(self.modify(id, |p| {
            p.product.is_active = is_active;
            p.product.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.check()?;
        let mut products = self.products.write().unwrap();
        let before = products.len();
        products.retain(|p| p.product.id != id);
        Ok(products.len() != before)
    }

    async fn add_image(
        &self,
        product_id: Uuid,
        image_url: &str,
        display_order: i32,
    ) -> Result<ProductImage> {
        self.check()?;
        let image = ProductImage {
            id: Uuid::new_v4(),
            product_id,
            image_url: image_url.to_string(),
            display_order,
            created_at: Utc::now(),
        };
        self.modify(product_id, |p| {
            p.images.push(image.clone());
            p.images.sort_by_key(|i| i.display_order);
        })
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", product_id)))?;
        Ok(image)
    }

    async fn delete_image(&self, product_id: Uuid, image_id: Uuid) -> Result<bool> {
        self.check()?;
        Ok(self
            .modify(product_id, |p| {
                let before = p.images.len();
                p.images.retain(|i| i.id != image_id);
                p.images.len() != before
            })
            .unwrap_or(false))
    }

    async fn count_by_category(&self, active_only: bool) -> Result<HashMap<String, i64>> {
        self.check()?;
        let mut counts = HashMap::new();
        for p in self.all() {
            if !active_only || p.product.is_active {
                *counts.entry(p.product.category.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}
