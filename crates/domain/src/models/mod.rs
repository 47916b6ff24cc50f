//! Domain models for RepuFeed.

pub mod feedback;
pub mod settings;
pub mod stats;

pub use feedback::{
    Feedback, FeedbackResponse, FeedbackSortKey, FeedbackStatus, ListFeedbackQuery, NewFeedback,
    SortOrder, SubmitFeedbackRequest, UpdateStatusRequest,
};
pub use settings::{PublicSettings, SettingsDocument, UpdateSettingsRequest};
pub use stats::FeedbackStats;
