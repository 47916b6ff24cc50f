//! Settings store: one JSON document of feature toggles, merged with
//! hardcoded defaults on every read.

use sqlx::PgPool;

use domain::models::{PublicSettings, SettingsDocument, UpdateSettingsRequest};
use persistence::repositories::{SettingRepository, SETTINGS_KEY};

use crate::error::ApiError;

/// Read/write access to the application settings document.
///
/// Reads never fail on bad data: an absent or corrupt blob falls back to the
/// defaults, and unknown persisted keys survive the merge untouched.
#[derive(Clone)]
pub struct SettingsStore {
    repository: SettingRepository,
    default_notification_email: String,
}

impl SettingsStore {
    pub fn new(pool: PgPool, default_notification_email: String) -> Self {
        Self {
            repository: SettingRepository::new(pool),
            default_notification_email,
        }
    }

    fn defaults(&self) -> SettingsDocument {
        SettingsDocument::defaults(&self.default_notification_email)
    }

    /// Returns the persisted document overlaid onto the defaults.
    pub async fn get_merged(&self) -> Result<SettingsDocument, ApiError> {
        let persisted = self.repository.get(SETTINGS_KEY).await?;
        Ok(SettingsDocument::merged(&self.defaults(), persisted.as_ref()))
    }

    /// Validates and applies a partial update, persists the merged document,
    /// and returns it. Unrecognized input keys are dropped.
    pub async fn update(
        &self,
        request: &UpdateSettingsRequest,
    ) -> Result<SettingsDocument, ApiError> {
        use validator::Validate;
        request.validate()?;

        let mut document = self.get_merged().await?;
        document.apply(request);

        let value = serde_json::to_value(&document)
            .map_err(|e| ApiError::Internal(format!("Failed to serialize settings: {}", e)))?;
        self.repository.upsert(SETTINGS_KEY, &value).await?;

        Ok(document)
    }

    /// Returns the subset of settings safe to expose to the public widget.
    pub async fn public_view(&self) -> Result<PublicSettings, ApiError> {
        let document = self.get_merged().await?;
        Ok(PublicSettings::from(&document))
    }
}
