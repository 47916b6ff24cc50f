//! Setting entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the settings table: one JSON blob per key.
#[derive(Debug, Clone, FromRow)]
pub struct SettingEntity {
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_setting_entity_holds_arbitrary_json() {
        let entity = SettingEntity {
            key: "app_settings".to_string(),
            value: json!({"allowAnonymousReviews": false}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(entity.value["allowAnonymousReviews"], json!(false));
    }
}
