//! Domain layer for the RepuFeed backend.
//!
//! This crate contains:
//! - Domain models (Feedback, SettingsDocument, FeedbackStats)
//! - Request/response payloads for the HTTP surface
//! - Pure business logic (submission validation policy, settings merge)

pub mod models;
pub mod services;
