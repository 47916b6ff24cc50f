//! Repository implementations.

pub mod feedback;
pub mod setting;

pub use feedback::FeedbackRepository;
pub use setting::{SettingRepository, SETTINGS_KEY};
