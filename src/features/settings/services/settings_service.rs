use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::settings::dtos::UpdateSettingsDto;
use crate::features::settings::models::{SiteSettings, SizeChart};
use crate::features::settings::resolver;
use crate::features::settings::store::SettingsStore;
use crate::shared::constants::{KEY_CATEGORIES, KEY_SIZE_CHART};

/// Loads, resolves and persists site configuration
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Resolved settings for read paths. A backend failure is logged and the
    /// compiled-in defaults are served instead.
    pub async fn load(&self) -> SiteSettings {
        match self.store.get_all().await {
            Ok(raw) => resolver::resolve(&raw),
            Err(e) => {
                tracing::warn!("Site settings unavailable, serving defaults: {}", e);
                SiteSettings::default()
            }
        }
    }

    /// Resolved settings for write paths. Backend failures propagate so that
    /// defaults are never written back over stored data.
    pub async fn load_strict(&self) -> Result<SiteSettings> {
        let raw = self
            .store
            .get_all()
            .await
            .map_err(|e| AppError::BackendUnavailable(e.to_string()))?;
        Ok(resolver::resolve(&raw))
    }

    /// Upsert each supplied scalar setting, one key at a time
    pub async fn update(&self, dto: UpdateSettingsDto) -> Result<SiteSettings> {
        let pairs = dto.into_pairs();
        for (key, value) in &pairs {
            self.store.upsert(key, value).await?;
        }
        tracing::info!("Updated {} site setting(s)", pairs.len());

        self.load_strict().await
    }

    /// Replace the whole category blob in a single write
    pub async fn save_categories(&self, categories: &[Category]) -> Result<()> {
        let json = resolver::encode_categories(categories)
            .map_err(|e| AppError::Internal(format!("Failed to serialize categories: {}", e)))?;
        self.store.upsert(KEY_CATEGORIES, &json).await
    }

    pub async fn update_size_chart(&self, chart: SizeChart) -> Result<SizeChart> {
        let json = resolver::encode_size_chart(&chart)
            .map_err(|e| AppError::Internal(format!("Failed to serialize size chart: {}", e)))?;
        self.store.upsert(KEY_SIZE_CHART, &json).await?;
        tracing::info!("Size chart updated ({} sizes)", chart.0.len());

        Ok(self.load_strict().await?.size_chart)
    }
}
