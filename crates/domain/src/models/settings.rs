//! Settings document model and merge logic.
//!
//! All settings live in one JSON blob persisted under a fixed key. Reads
//! always overlay the persisted blob onto hardcoded defaults, so absent keys
//! never surface as absent to clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

/// The full settings document, as returned by the admin settings endpoints.
///
/// The key names are part of the public API contract and use the historical
/// mixed casing (camelCase toggles plus `notification_email`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(rename = "enablePublicReviews")]
    pub enable_public_reviews: bool,

    #[serde(rename = "requireApproval")]
    pub require_approval: bool,

    #[serde(rename = "enableEmailNotifications")]
    pub enable_email_notifications: bool,

    #[serde(rename = "showRatingsBreakdown")]
    pub show_ratings_breakdown: bool,

    #[serde(rename = "allowAnonymousReviews")]
    pub allow_anonymous_reviews: bool,

    #[serde(rename = "minimumRatingToShow")]
    pub minimum_rating_to_show: i32,

    pub notification_email: String,

    /// Unknown persisted keys are retained across the merge.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsDocument {
    /// Hardcoded defaults, used whenever no blob (or a corrupt blob) is
    /// persisted. `notification_email` defaults to the configured sender
    /// address.
    pub fn defaults(notification_email: &str) -> Self {
        Self {
            enable_public_reviews: true,
            require_approval: true,
            enable_email_notifications: true,
            show_ratings_breakdown: true,
            allow_anonymous_reviews: true,
            minimum_rating_to_show: 1,
            notification_email: notification_email.to_string(),
            extra: Map::new(),
        }
    }

    /// Overlays a persisted blob onto the defaults.
    ///
    /// Persisted keys win over defaults; keys this version does not recognize
    /// are kept in `extra`. Anything that does not parse as a settings object
    /// falls back to the pure defaults, so this never fails.
    pub fn merged(defaults: &Self, persisted: Option<&Value>) -> Self {
        let Some(Value::Object(overrides)) = persisted else {
            return defaults.clone();
        };

        let mut map = match serde_json::to_value(defaults) {
            Ok(Value::Object(map)) => map,
            _ => return defaults.clone(),
        };
        for (key, value) in overrides {
            map.insert(key.clone(), value.clone());
        }

        serde_json::from_value(Value::Object(map)).unwrap_or_else(|_| defaults.clone())
    }

    /// Applies a validated partial update in place. Absent fields keep their
    /// current values; unrecognized input keys were already dropped during
    /// deserialization.
    pub fn apply(&mut self, update: &UpdateSettingsRequest) {
        if let Some(v) = update.enable_public_reviews {
            self.enable_public_reviews = v;
        }
        if let Some(v) = update.require_approval {
            self.require_approval = v;
        }
        if let Some(v) = update.enable_email_notifications {
            self.enable_email_notifications = v;
        }
        if let Some(v) = update.show_ratings_breakdown {
            self.show_ratings_breakdown = v;
        }
        if let Some(v) = update.allow_anonymous_reviews {
            self.allow_anonymous_reviews = v;
        }
        if let Some(v) = update.minimum_rating_to_show {
            self.minimum_rating_to_show = v;
        }
        if let Some(ref v) = update.notification_email {
            self.notification_email = v.clone();
        }
    }
}

/// Partial settings update accepted by PUT /api/settings.
///
/// Every field is optional; unknown keys in the request body are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[serde(rename = "enablePublicReviews")]
    pub enable_public_reviews: Option<bool>,

    #[serde(rename = "requireApproval")]
    pub require_approval: Option<bool>,

    #[serde(rename = "enableEmailNotifications")]
    pub enable_email_notifications: Option<bool>,

    #[serde(rename = "showRatingsBreakdown")]
    pub show_ratings_breakdown: Option<bool>,

    #[serde(rename = "allowAnonymousReviews")]
    pub allow_anonymous_reviews: Option<bool>,

    #[serde(rename = "minimumRatingToShow")]
    #[validate(range(min = 1, max = 5, message = "The minimum rating to show must be between 1 and 5"))]
    pub minimum_rating_to_show: Option<i32>,

    #[validate(custom(function = "validate_notification_email"))]
    pub notification_email: Option<String>,
}

fn validate_notification_email(value: &str) -> Result<(), ValidationError> {
    shared::validation::validate_email_or_empty(value)
}

/// The settings subset safe for unauthenticated consumption.
#[derive(Debug, Clone, Serialize)]
pub struct PublicSettings {
    #[serde(rename = "enablePublicReviews")]
    pub enable_public_reviews: bool,

    #[serde(rename = "requireApproval")]
    pub require_approval: bool,

    #[serde(rename = "showRatingsBreakdown")]
    pub show_ratings_breakdown: bool,

    #[serde(rename = "allowAnonymousReviews")]
    pub allow_anonymous_reviews: bool,

    #[serde(rename = "minimumRatingToShow")]
    pub minimum_rating_to_show: i32,
}

impl From<&SettingsDocument> for PublicSettings {
    fn from(settings: &SettingsDocument) -> Self {
        Self {
            enable_public_reviews: settings.enable_public_reviews,
            require_approval: settings.require_approval,
            show_ratings_breakdown: settings.show_ratings_breakdown,
            allow_anonymous_reviews: settings.allow_anonymous_reviews,
            minimum_rating_to_show: settings.minimum_rating_to_show,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SENDER: &str = "noreply@repufeed.app";

    #[test]
    fn test_defaults() {
        let defaults = SettingsDocument::defaults(SENDER);
        assert!(defaults.enable_public_reviews);
        assert!(defaults.require_approval);
        assert!(defaults.enable_email_notifications);
        assert!(defaults.show_ratings_breakdown);
        assert!(defaults.allow_anonymous_reviews);
        assert_eq!(defaults.minimum_rating_to_show, 1);
        assert_eq!(defaults.notification_email, SENDER);
        assert!(defaults.extra.is_empty());
    }

    #[test]
    fn test_merged_without_persisted_blob_is_pure_defaults() {
        let defaults = SettingsDocument::defaults(SENDER);
        let merged = SettingsDocument::merged(&defaults, None);
        assert_eq!(merged, defaults);
        // Idempotent: merging twice yields the same document.
        assert_eq!(SettingsDocument::merged(&defaults, None), merged);
    }

    #[test]
    fn test_merged_persisted_keys_override_defaults() {
        let defaults = SettingsDocument::defaults(SENDER);
        let persisted = json!({"allowAnonymousReviews": false, "minimumRatingToShow": 3});
        let merged = SettingsDocument::merged(&defaults, Some(&persisted));
        assert!(!merged.allow_anonymous_reviews);
        assert_eq!(merged.minimum_rating_to_show, 3);
        // Untouched keys keep their defaults.
        assert!(merged.enable_public_reviews);
        assert_eq!(merged.notification_email, SENDER);
    }

    #[test]
    fn test_merged_retains_unknown_persisted_keys() {
        let defaults = SettingsDocument::defaults(SENDER);
        let persisted = json!({"legacyBannerText": "hello", "requireApproval": false});
        let merged = SettingsDocument::merged(&defaults, Some(&persisted));
        assert!(!merged.require_approval);
        assert_eq!(merged.extra.get("legacyBannerText"), Some(&json!("hello")));

        let round_tripped = serde_json::to_value(&merged).expect("serializes");
        assert_eq!(round_tripped["legacyBannerText"], json!("hello"));
    }

    #[test]
    fn test_merged_falls_back_on_corrupt_blob() {
        let defaults = SettingsDocument::defaults(SENDER);
        assert_eq!(
            SettingsDocument::merged(&defaults, Some(&json!("not an object"))),
            defaults
        );
        assert_eq!(
            SettingsDocument::merged(
                &defaults,
                Some(&json!({"minimumRatingToShow": "three"}))
            ),
            defaults
        );
    }

    #[test]
    fn test_apply_partial_update() {
        let mut settings = SettingsDocument::defaults(SENDER);
        let update = UpdateSettingsRequest {
            minimum_rating_to_show: Some(4),
            enable_email_notifications: Some(false),
            ..Default::default()
        };
        settings.apply(&update);
        assert_eq!(settings.minimum_rating_to_show, 4);
        assert!(!settings.enable_email_notifications);
        // Everything else is untouched.
        assert!(settings.allow_anonymous_reviews);
        assert_eq!(settings.notification_email, SENDER);
    }

    #[test]
    fn test_update_request_drops_unknown_keys() {
        let update: UpdateSettingsRequest = serde_json::from_value(json!({
            "requireApproval": false,
            "adminPassword": "nice try"
        }))
        .expect("unknown keys are ignored");
        assert_eq!(update.require_approval, Some(false));
    }

    #[test]
    fn test_update_request_validation() {
        let valid = UpdateSettingsRequest {
            minimum_rating_to_show: Some(5),
            notification_email: Some("admin@example.com".to_string()),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let out_of_range = UpdateSettingsRequest {
            minimum_rating_to_show: Some(6),
            ..Default::default()
        };
        assert!(out_of_range.validate().is_err());

        let bad_email = UpdateSettingsRequest {
            notification_email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());

        // Blank disables the override and is allowed.
        let blank_email = UpdateSettingsRequest {
            notification_email: Some(String::new()),
            ..Default::default()
        };
        assert!(blank_email.validate().is_ok());
    }

    #[test]
    fn test_public_view_exposes_only_safe_keys() {
        let mut settings = SettingsDocument::defaults(SENDER);
        settings.minimum_rating_to_show = 2;
        let json = serde_json::to_value(PublicSettings::from(&settings)).expect("serializes");

        let object = json.as_object().expect("object");
        assert_eq!(object.len(), 5);
        assert!(object.contains_key("enablePublicReviews"));
        assert!(object.contains_key("requireApproval"));
        assert!(object.contains_key("showRatingsBreakdown"));
        assert!(object.contains_key("allowAnonymousReviews"));
        assert_eq!(object["minimumRatingToShow"], json!(2));
        assert!(!object.contains_key("notification_email"));
        assert!(!object.contains_key("enableEmailNotifications"));
    }
}
