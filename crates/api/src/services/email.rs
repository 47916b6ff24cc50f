//! Email service for sending feedback notifications.
//!
//! Supports multiple mail providers:
//! - `console`: Logs emails to console (development)
//! - `smtp`: Logged stub pending full SMTP transport support
//! - `sendgrid`: Uses the SendGrid HTTP API

use crate::config::MailConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body_text: String,
    /// HTML body (optional)
    pub body_html: Option<String>,
}

/// Email service for sending transactional mail.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<MailConfig>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: MailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "smtp" => self.send_smtp(message).await,
            "sendgrid" => self.send_sendgrid(message).await,
            provider => {
                error!(provider = %provider, "Unknown mail provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Notify the shop owner about a new feedback submission.
    pub async fn send_feedback_notification(
        &self,
        to_email: &str,
        submitter_name: &str,
        rating: i32,
        comment: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("New feedback from {} - RepuFeed", submitter_name);

        let stars = "★".repeat(rating.clamp(0, 5) as usize);

        let body_text = format!(
            r#"New feedback was submitted.

From: {name}
Rating: {rating}/5

{comment}

Review it in your dashboard to approve or hide it."#,
            name = submitter_name,
            rating = rating,
            comment = comment,
        );

        let body_html = if self.config.template_style == "html" {
            Some(format!(
                r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>New feedback</title>
</head>
<body style="font-family: -apple-system, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="margin-top: 0;">New feedback submitted</h2>
    <p><strong>From:</strong> {name}</p>
    <p><strong>Rating:</strong> <span style="color: #f5a623;">{stars}</span> ({rating}/5)</p>
    <blockquote style="border-left: 3px solid #ddd; margin: 16px 0; padding: 8px 16px; color: #555;">{comment}</blockquote>
    <p style="color: #666; font-size: 14px;">Review it in your dashboard to approve or hide it.</p>
</body>
</html>"#,
                name = submitter_name,
                stars = stars,
                rating = rating,
                comment = comment,
            ))
        } else {
            None
        };

        let message = EmailMessage {
            to: to_email.to_string(),
            subject,
            body_text,
            body_html,
        };

        self.send(message).await
    }

    /// Console provider: log the email instead of sending it.
    async fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "=== EMAIL (console provider) ===\n{}",
            message.body_text
        );
        Ok(())
    }

    /// SMTP provider. Transport integration is pending; until then the send
    /// is logged so deployments configured for SMTP are visible in traces.
    async fn send_smtp(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.smtp_host.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        warn!(
            to = %message.to,
            subject = %message.subject,
            smtp_host = %self.config.smtp_host,
            smtp_port = self.config.smtp_port,
            "SMTP transport not yet wired, logging email instead"
        );
        Ok(())
    }

    /// SendGrid provider: send via the v3 mail/send HTTP API.
    async fn send_sendgrid(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let mut content = vec![serde_json::json!({
            "type": "text/plain",
            "value": message.body_text,
        })];
        if let Some(html) = &message.body_html {
            content.push(serde_json::json!({
                "type": "text/html",
                "value": html,
            }));
        }

        let payload = serde_json::json!({
            "personalizations": [{
                "to": [{"email": message.to}],
            }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name,
            },
            "subject": message.subject,
            "content": content,
        });

        let client = reqwest::Client::new();
        let response = client
            .post("https://api.sendgrid.com/v3/mail/send")
            .bearer_auth(&self.config.sendgrid_api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        if response.status().is_success() {
            info!(to = %message.to, "Email sent via SendGrid");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(EmailError::ProviderError(format!(
                "SendGrid returned {}: {}",
                status, body
            )))
        }
    }
}
