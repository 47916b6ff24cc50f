//! Setting repository for the key-value settings store.

use sqlx::PgPool;

use crate::metrics::QueryTimer;

/// Key under which the application settings blob is stored.
pub const SETTINGS_KEY: &str = "app_settings";

/// Repository for settings stored as JSON blobs keyed by name.
#[derive(Clone)]
pub struct SettingRepository {
    pool: PgPool,
}

impl SettingRepository {
    /// Creates a new SettingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the raw JSON blob for a key, `None` when never persisted.
    pub async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, sqlx::Error> {
        let timer = QueryTimer::new("get_setting");
        let result = sqlx::query_scalar::<_, serde_json::Value>(
            "SELECT value FROM settings WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Inserts or replaces the blob stored under a key.
    pub async fn upsert(&self, key: &str, value: &serde_json::Value) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("upsert_setting");
        let result = sqlx::query(
            r#"
            INSERT INTO settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await;
        timer.record();
        result.map(|_| ())
    }
}
