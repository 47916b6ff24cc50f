//! Submission validation policy.
//!
//! Pure validation of a raw feedback submission against the current settings.
//! Runs before any store access, so a rejected submission never leaves a
//! partial write behind.

use shared::validation::{
    is_valid_email, MAX_FIELD_LENGTH, MAX_MESSAGE_LENGTH, MIN_MESSAGE_LENGTH, MIN_NAME_LENGTH,
};
use thiserror::Error;

use crate::models::{NewFeedback, SettingsDocument, SubmitFeedbackRequest};

/// Name stored when a submitter leaves the name blank.
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Reasons a submission is rejected. The display strings are the exact
/// human-readable messages surfaced to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("The rating must be an integer between 1 and 5.")]
    InvalidRating,

    #[error("The feedback text must be at least 10 characters.")]
    MessageTooShort,

    #[error("The feedback text may not be greater than 1000 characters.")]
    MessageTooLong,

    #[error("Name is required and must be at least 2 characters.")]
    NameRequired,

    #[error("A valid email address is required.")]
    EmailRequired,

    #[error("The name must be between 2 and 255 characters.")]
    InvalidName,

    #[error("The email must be a valid email address.")]
    InvalidEmail,
}

/// Validates a raw submission against the current settings.
///
/// When anonymity is disallowed, name and email become mandatory; when it is
/// allowed they stay optional but are still format-checked if present. On
/// success the returned record has name defaulted to [`ANONYMOUS_NAME`] and
/// email defaulted to the empty string.
pub fn validate(
    request: &SubmitFeedbackRequest,
    settings: &SettingsDocument,
) -> Result<NewFeedback, SubmissionError> {
    let rating = request.rating.ok_or(SubmissionError::InvalidRating)?;
    if !(1..=5).contains(&rating) {
        return Err(SubmissionError::InvalidRating);
    }

    let message = request.text().trim();
    let message_len = message.chars().count();
    if message_len < MIN_MESSAGE_LENGTH {
        return Err(SubmissionError::MessageTooShort);
    }
    if message_len > MAX_MESSAGE_LENGTH {
        return Err(SubmissionError::MessageTooLong);
    }

    let anonymous_allowed = settings.allow_anonymous_reviews;

    let name = request.name.as_deref().unwrap_or("").trim();
    let name_len = name.chars().count();
    if name.is_empty() {
        if !anonymous_allowed {
            return Err(SubmissionError::NameRequired);
        }
    } else if name_len < MIN_NAME_LENGTH {
        if anonymous_allowed {
            return Err(SubmissionError::InvalidName);
        }
        return Err(SubmissionError::NameRequired);
    } else if name_len > MAX_FIELD_LENGTH {
        return Err(SubmissionError::InvalidName);
    }

    let email = request.email.as_deref().unwrap_or("").trim();
    if email.is_empty() {
        if !anonymous_allowed {
            return Err(SubmissionError::EmailRequired);
        }
    } else if !is_valid_email(email) {
        if anonymous_allowed {
            return Err(SubmissionError::InvalidEmail);
        }
        return Err(SubmissionError::EmailRequired);
    }

    Ok(NewFeedback {
        name: if name.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            name.to_string()
        },
        email: email.to_string(),
        message: message.to_string(),
        rating,
    })
}
