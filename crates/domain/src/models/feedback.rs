//! Feedback domain model and API payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One customer-submitted rating and comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Feedback {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: i32,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new feedback record, produced by the submission
/// policy. Name and email are already defaulted ("Anonymous" / empty string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub message: String,
    pub rating: i32,
}

/// Raw submission payload.
///
/// Legacy clients send the feedback text under `comment`; newer ones use
/// `message`. Both are accepted here and coalesced before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SubmitFeedbackRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub comment: Option<String>,
    pub rating: Option<i32>,
}

impl SubmitFeedbackRequest {
    /// Canonical feedback text: `message` takes precedence over `comment`.
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.comment.as_deref())
            .unwrap_or("")
    }
}

/// Moderation status as exposed to clients.
///
/// Only a boolean is persisted; `hidden` is accepted on input and stored
/// identically to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Approved,
    Pending,
    Hidden,
}

impl FeedbackStatus {
    /// Parses a client-supplied status value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "approved" => Some(Self::Approved),
            "pending" => Some(Self::Pending),
            "hidden" => Some(Self::Hidden),
            _ => None,
        }
    }

    /// Whether this status marks the record as approved.
    pub fn approves(self) -> bool {
        matches!(self, Self::Approved)
    }
}

/// Request payload for PATCH /api/feedback/{id}/status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Sort column for feedback listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackSortKey {
    CreatedAt,
    Rating,
}

impl FeedbackSortKey {
    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Rating => "rating",
        }
    }
}

/// Sort direction for feedback listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Query parameters accepted by the feedback listing endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ListFeedbackQuery {
    pub sort: Option<String>,
    pub order: Option<String>,
    pub limit: Option<i64>,
}

impl ListFeedbackQuery {
    /// `sort=rating` selects the rating column; anything else falls back to
    /// creation time (the `date` alias).
    pub fn sort_key(&self) -> FeedbackSortKey {
        match self.sort.as_deref() {
            Some("rating") => FeedbackSortKey::Rating,
            _ => FeedbackSortKey::CreatedAt,
        }
    }

    /// `order=asc` (case-insensitive) sorts ascending; anything else descends.
    pub fn sort_order(&self) -> SortOrder {
        match self.order.as_deref() {
            Some(o) if o.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    /// Positive limit truncates the result; zero/negative values are ignored.
    pub fn effective_limit(&self) -> Option<i64> {
        self.limit.filter(|l| *l > 0)
    }
}

/// Transformed record shape returned by every feedback endpoint.
///
/// Carries both the canonical fields and legacy aliases (`comment` for
/// `message`, `date` for `created_at`) for backward-compatible consumers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FeedbackResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub comment: String,
    pub rating: i32,
    pub is_approved: bool,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
    pub date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self {
            id: feedback.id,
            name: feedback.name,
            email: feedback.email,
            comment: feedback.message.clone(),
            message: feedback.message,
            rating: feedback.rating,
            is_approved: feedback.is_approved,
            status: if feedback.is_approved {
                "approved"
            } else {
                "pending"
            },
            created_at: feedback.created_at,
            date: feedback.created_at,
            updated_at: feedback.updated_at,
        }
    }
}
