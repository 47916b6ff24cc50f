//! Feedback submission orchestration.

use sqlx::PgPool;
use tracing::warn;

use domain::models::{Feedback, SettingsDocument, SubmitFeedbackRequest};
use domain::services::submission;
use persistence::repositories::FeedbackRepository;

use crate::error::ApiError;
use crate::middleware::metrics::record_feedback_submitted;
use crate::services::{EmailService, SettingsStore};

/// Handles the public submission flow: settings-aware validation, insert,
/// then best-effort owner notification.
#[derive(Clone)]
pub struct FeedbackService {
    repository: FeedbackRepository,
    settings: SettingsStore,
    email: EmailService,
    fallback_notification_email: String,
}

impl FeedbackService {
    pub fn new(
        pool: PgPool,
        settings: SettingsStore,
        email: EmailService,
        fallback_notification_email: String,
    ) -> Self {
        Self {
            repository: FeedbackRepository::new(pool),
            settings,
            email,
            fallback_notification_email,
        }
    }

    /// Validates and stores a submission, returning the created record.
    ///
    /// Validation is fail-fast: nothing touches the feedback table until the
    /// request passes. Notification dispatch happens on a detached task after
    /// the insert returns; delivery failures never affect the response.
    pub async fn submit(&self, request: &SubmitFeedbackRequest) -> Result<Feedback, ApiError> {
        let settings = self.settings.get_merged().await?;

        let new = submission::validate(request, &settings)?;

        let entity = self.repository.insert(&new).await?;
        let feedback: Feedback = entity.into();

        record_feedback_submitted(feedback.rating);

        if settings.enable_email_notifications {
            if let Some(destination) = self.notification_destination(&settings) {
                let email = self.email.clone();
                let name = feedback.name.clone();
                let rating = feedback.rating;
                let comment = feedback.message.clone();
                tokio::spawn(async move {
                    if let Err(e) = email
                        .send_feedback_notification(&destination, &name, rating, &comment)
                        .await
                    {
                        warn!(error = %e, "Failed to send feedback notification");
                    }
                });
            }
        }

        Ok(feedback)
    }

    /// Resolves the notification destination: the configured
    /// `notification_email` setting, falling back to the sender address.
    fn notification_destination(&self, settings: &SettingsDocument) -> Option<String> {
        let destination = if settings.notification_email.trim().is_empty() {
            self.fallback_notification_email.trim()
        } else {
            settings.notification_email.trim()
        };

        if destination.is_empty() {
            None
        } else {
            Some(destination.to_string())
        }
    }
}
