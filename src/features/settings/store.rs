use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};

/// Key/value persistence for site configuration.
///
/// Writes are per key; there is no batch transaction, so a multi-key update
/// can be partially applied if the backend fails midway.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get_all(&self) -> Result<HashMap<String, String>>;

    async fn upsert(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, FromRow)]
struct SettingRow {
    key: String,
    value: String,
}

/// `site_settings` table backed store
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get_all(&self) -> Result<HashMap<String, String>> {
        let rows = sqlx::query_as::<_, SettingRow>("SELECT key, value FROM site_settings")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load site settings: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(|r| (r.key, r.value)).collect())
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO site_settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert site setting '{}': {:?}", key, e);
            AppError::Database(e)
        })?;

        Ok(())
    }
}
