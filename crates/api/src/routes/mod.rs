//! HTTP route handlers.

pub mod feedback;
pub mod health;
pub mod settings;
