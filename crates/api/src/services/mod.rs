//! Application services orchestrating domain logic, persistence, and mail.

pub mod email;
pub mod feedback;
pub mod settings;

pub use email::EmailService;
pub use feedback::FeedbackService;
pub use settings::SettingsStore;
