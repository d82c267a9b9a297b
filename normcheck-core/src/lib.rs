//! Core types, traits, errors, config, and tracing for Normcheck.
//!
//! This crate defines the shared vocabulary of the rule analysis engine:
//! rule books and their entries, project analyses and analyst decisions,
//! the storage trait seams, and the ambient concerns (errors, config,
//! logging) every other crate builds on. It never depends on a concrete
//! storage or engine implementation.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;
