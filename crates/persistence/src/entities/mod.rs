//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod feedback;
pub mod setting;

pub use feedback::FeedbackEntity;
pub use setting::SettingEntity;
