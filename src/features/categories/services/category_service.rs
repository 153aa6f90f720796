use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryResponseDto;
use crate::features::categories::models::{Category, CategoryPatch, MoveDirection, NewCategory};
use crate::features::categories::registry::{CategoryError, CategoryRegistry};
use crate::features::products::models::ProductFilter;
use crate::features::products::store::ProductStore;
use crate::features::settings::SettingsService;
use crate::shared::constants::AVAILABLE_ICONS;

fn with_counts(categories: Vec<Category>, counts: &HashMap<String, i64>) -> Vec<CategoryResponseDto> {
    categories
        .into_iter()
        .map(|category| CategoryResponseDto {
            product_count: counts.get(&category.slug).copied().unwrap_or(0),
            category,
        })
        .collect()
}

fn warn_unknown_icon(icon: Option<&str>) {
    if let Some(icon) = icon.filter(|i| !i.trim().is_empty()) {
        if !AVAILABLE_ICONS.contains(&icon) {
            tracing::warn!("Category icon '{}' is not a bundled asset", icon);
        }
    }
}

/// Category management on top of the settings blob.
///
/// Every mutation loads the current list strictly, applies the change in a
/// [`CategoryRegistry`] and writes the whole list back in one upsert.
pub struct CategoryService {
    settings: Arc<SettingsService>,
    products: Arc<dyn ProductStore>,
}

impl CategoryService {
    pub fn new(settings: Arc<SettingsService>, products: Arc<dyn ProductStore>) -> Self {
        Self { settings, products }
    }

    /// Number of products (active or not) filed under `slug`
    pub async fn reference_count(&self, slug: &str) -> Result<i64> {
        self.products.count(&ProductFilter::in_category(slug)).await
    }

    async fn registry(&self) -> Result<CategoryRegistry> {
        let settings = self.settings.load_strict().await?;
        Ok(CategoryRegistry::new(settings.categories))
    }

    async fn persist(&self, registry: CategoryRegistry) -> Result<()> {
        self.settings
            .save_categories(&registry.into_sorted())
            .await
    }

    /// Active categories in display order with active product counts
    pub async fn list_active(&self) -> Result<Vec<CategoryResponseDto>> {
        let settings = self.settings.load().await;
        let registry = CategoryRegistry::new(settings.categories);
        let counts = self.products.count_by_category(true).await?;

        Ok(with_counts(registry.list_active(), &counts))
    }

    pub async fn get_active(&self, slug: &str) -> Result<CategoryResponseDto> {
        let settings = self.settings.load().await;
        let category = CategoryRegistry::new(settings.categories)
            .get(slug)
            .filter(|c| c.active)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;

        let product_count = self
            .products
            .count(&ProductFilter::storefront(Some(category.slug.clone())))
            .await?;

        Ok(CategoryResponseDto {
            category,
            product_count,
        })
    }

    /// Every category in display order with total reference counts
    pub async fn list_all(&self) -> Result<Vec<CategoryResponseDto>> {
        let registry = self.registry().await?;
        let counts = self.products.count_by_category(false).await?;

        Ok(with_counts(registry.list_all(), &counts))
    }

    pub async fn add(&self, candidate: NewCategory) -> Result<Category> {
        warn_unknown_icon(candidate.icon.as_deref());

        let mut registry = self.registry().await?;
        let category = registry.add(candidate)?;
        self.persist(registry).await?;

        tracing::info!("Category '{}' added", category.slug);
        Ok(category)
    }

    pub async fn update(&self, slug: &str, patch: CategoryPatch) -> Result<Category> {
        warn_unknown_icon(patch.icon.as_deref());

        let mut registry = self.registry().await?;
        if !registry.contains(slug) {
            return Err(CategoryError::NotFound(slug.to_string()).into());
        }
        let reference_count = self.reference_count(slug).await?;

        let category = registry.update(slug, patch, reference_count)?;
        self.persist(registry).await?;

        tracing::info!("Category '{}' updated", category.slug);
        Ok(category)
    }

    pub async fn remove(&self, slug: &str) -> Result<Category> {
        let mut registry = self.registry().await?;
        if !registry.contains(slug) {
            return Err(CategoryError::NotFound(slug.to_string()).into());
        }
        let reference_count = self.reference_count(slug).await?;

        let removed = registry.remove(slug, reference_count)?;
        self.persist(registry).await?;

        tracing::info!("Category '{}' removed", slug);
        Ok(removed)
    }

    /// Move a category one step; returns the full list in its new order.
    /// Nothing is written when it already sits at the boundary.
    pub async fn reorder(&self, slug: &str, direction: MoveDirection) -> Result<Vec<Category>> {
        let mut registry = self.registry().await?;
        if registry.reorder(slug, direction)? {
            let categories = registry.list_all();
            self.persist(registry).await?;
            Ok(categories)
        } else {
            Ok(registry.list_all())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::models::default_categories;
    use crate::features::settings::models::SiteSettings;
    use crate::shared::test_helpers::{sample_product, InMemoryProductStore, InMemorySettingsStore};
    use tokio_test::{assert_err, assert_ok};

    struct Fixture {
        service: CategoryService,
        settings: Arc<SettingsService>,
        settings_store: Arc<InMemorySettingsStore>,
    }

    fn fixture(products: Vec<crate::features::products::models::ProductWithImages>) -> Fixture {
        let settings_store = Arc::new(InMemorySettingsStore::default());
        let settings = Arc::new(SettingsService::new(settings_store.clone()));
        let product_store = Arc::new(InMemoryProductStore::with_products(products));
        Fixture {
            service: CategoryService::new(settings.clone(), product_store),
            settings,
            settings_store,
        }
    }

    fn slugs(categories: &[Category]) -> Vec<&str> {
        categories.iter().map(|c| c.slug.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_active_with_counts() {
        let mut hidden = sample_product("Hidden", "plain");
        hidden.product.is_active = false;
        let f = fixture(vec![
            sample_product("A", "plain"),
            sample_product("B", "plain"),
            hidden,
            sample_product("C", "collar"),
        ]);

        let listed = assert_ok!(f.service.list_active().await);
        assert_eq!(listed.len(), 9);
        assert_eq!(listed[0].category.slug, "plain");
        assert_eq!(listed[0].product_count, 2);

        let all = assert_ok!(f.service.list_all().await);
        assert_eq!(all[0].product_count, 3);
    }

    #[tokio::test]
    async fn test_get_active() {
        let f = fixture(vec![sample_product("A", "printed")]);

        let printed = assert_ok!(f.service.get_active("printed").await);
        assert_eq!(printed.product_count, 1);

        assert_ok!(
            f.service
                .update(
                    "printed",
                    CategoryPatch {
                        active: Some(false),
                        ..Default::default()
                    }
                )
                .await
        );
        let err = assert_err!(f.service.get_active("printed").await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_persists_whole_list_once() {
        let f = fixture(vec![]);

        let added = assert_ok!(
            f.service
                .add(NewCategory {
                    name: "Oversized Tees".to_string(),
                    ..Default::default()
                })
                .await
        );
        assert_eq!(added.slug, "oversizedtees");
        assert_eq!(added.order, 10);
        assert_eq!(f.settings_store.upsert_count(), 1);

        let stored = f.settings.load().await.categories;
        assert_eq!(stored.len(), 10);
        assert_eq!(stored.last().map(|c| c.slug.as_str()), Some("oversizedtees"));
    }

    #[tokio::test]
    async fn test_remove_in_use_category() {
        let products = (0..5)
            .map(|i| sample_product(&format!("Printed {}", i), "printed"))
            .collect();
        let f = fixture(products);

        let err = assert_err!(f.service.remove("printed").await);
        match err {
            AppError::InUse { message, count } => {
                assert!(message.contains("5 product(s)"));
                assert_eq!(count, 5);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(f.settings_store.upsert_count(), 0);
        assert_eq!(f.settings.load().await.categories, default_categories());
    }

    #[tokio::test]
    async fn test_remove_missing_category() {
        let f = fixture(vec![]);
        let err = assert_err!(f.service.remove("denim").await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rename_blocked_when_referenced() {
        let f = fixture(vec![sample_product("A", "plain")]);

        let err = assert_err!(
            f.service
                .update(
                    "plain",
                    CategoryPatch {
                        slug: Some("solid".to_string()),
                        ..Default::default()
                    }
                )
                .await
        );
        assert!(matches!(err, AppError::Conflict(_)));

        let renamed = assert_ok!(
            f.service
                .update(
                    "printed",
                    CategoryPatch {
                        slug: Some("graphic".to_string()),
                        ..Default::default()
                    }
                )
                .await
        );
        assert_eq!(renamed.slug, "graphic");
    }

    #[tokio::test]
    async fn test_reorder_boundary_writes_nothing() {
        let f = fixture(vec![]);

        let unchanged = assert_ok!(f.service.reorder("plain", MoveDirection::Up).await);
        assert_eq!(slugs(&unchanged)[0], "plain");
        assert_eq!(f.settings_store.upsert_count(), 0);

        let moved = assert_ok!(f.service.reorder("plain", MoveDirection::Down).await);
        assert_eq!(slugs(&moved)[..2], ["printed", "plain"]);
        assert_eq!(f.settings_store.upsert_count(), 1);
    }

    #[tokio::test]
    async fn test_mutation_never_overwrites_on_backend_error() {
        let f = fixture(vec![]);
        f.settings_store.set_unavailable(true);

        let err = assert_err!(
            f.service
                .add(NewCategory {
                    name: "Denim".to_string(),
                    ..Default::default()
                })
                .await
        );
        assert!(matches!(err, AppError::BackendUnavailable(_)));

        f.settings_store.set_unavailable(false);
        assert_eq!(f.settings_store.upsert_count(), 0);
        assert_eq!(f.settings.load().await, SiteSettings::default());
    }

    #[tokio::test]
    async fn test_storefront_scenario() {
        let f = fixture(vec![]);

        // Start from two categories only
        let mut two = default_categories();
        two.truncate(2);
        assert_ok!(f.settings.save_categories(&two).await);

        assert_ok!(
            f.service
                .add(NewCategory {
                    name: "Polo Shirts".to_string(),
                    ..Default::default()
                })
                .await
        );
        assert_ok!(
            f.service
                .update(
                    "printed",
                    CategoryPatch {
                        active: Some(false),
                        ..Default::default()
                    }
                )
                .await
        );
        assert_ok!(f.service.reorder("poloshirts", MoveDirection::Up).await);

        let active = assert_ok!(f.service.list_active().await);
        let active: Vec<&str> = active.iter().map(|c| c.category.slug.as_str()).collect();
        assert_eq!(active, ["plain", "poloshirts"]);

        let all = assert_ok!(f.service.list_all().await);
        let all: Vec<&str> = all.iter().map(|c| c.category.slug.as_str()).collect();
        assert_eq!(all, ["plain", "poloshirts", "printed"]);
    }
}
