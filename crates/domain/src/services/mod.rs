//! Business logic services.

pub mod submission;
