//! Shared utilities for the RepuFeed backend.
//!
//! This crate provides common functionality used across the other crates:
//! - Input validation logic (email format, rating range, comment length)

pub mod validation;
