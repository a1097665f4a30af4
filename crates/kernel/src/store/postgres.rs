//! PostgreSQL settings backend.
//!
//! Stores the record as one JSONB row in `site_config`, keyed by
//! [`SETTINGS_KEY`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use super::SettingsRecord;
use super::backend::{SettingsBackend, WriteOutcome};

/// `site_config` key holding the settings record.
pub const SETTINGS_KEY: &str = "vetrina_settings";

/// Settings backend storing the record in PostgreSQL.
#[derive(Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    /// Create a backend over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and make sure the table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("failed to connect to PostgreSQL")?;

        let backend = Self::new(pool);
        backend.ensure_schema().await?;
        info!("PostgreSQL settings backend ready");
        Ok(backend)
    }

    /// Create the `site_config` table if missing.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS site_config (
                key TEXT PRIMARY KEY,
                value JSONB NOT NULL,
                updated TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to create site_config table")?;
        Ok(())
    }
}

#[async_trait]
impl SettingsBackend for PgBackend {
    async fn read(&self) -> Result<Option<SettingsRecord>> {
        let value = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT value FROM site_config WHERE key = $1",
        )
        .bind(SETTINGS_KEY)
        .fetch_optional(&self.pool)
        .await
        .context("failed to load settings")?;

        value
            .map(|v| serde_json::from_value(v).context("failed to parse settings"))
            .transpose()
    }

    async fn write(&self, record: &SettingsRecord, expected: u64) -> Result<WriteOutcome> {
        let mut tx = self.pool.begin().await.context("begin transaction")?;

        let existing = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT value FROM site_config WHERE key = $1 FOR UPDATE",
        )
        .bind(SETTINGS_KEY)
        .fetch_optional(&mut *tx)
        .await
        .context("failed to lock settings row")?;

        let current = existing
            .as_ref()
            .and_then(|v| v.get("revision"))
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        if current != expected {
            return Ok(WriteOutcome::Conflict { current });
        }

        let value = serde_json::to_value(record).context("serialize settings")?;
        sqlx::query(
            r#"
            INSERT INTO site_config (key, value, updated)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = $2, updated = NOW()
            "#,
        )
        .bind(SETTINGS_KEY)
        .bind(value)
        .execute(&mut *tx)
        .await
        .context("failed to save settings")?;

        tx.commit().await.context("commit settings")?;
        Ok(WriteOutcome::Written)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
