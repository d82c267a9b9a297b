//! Configuration system for Normcheck.
//! TOML-based; every field has a default so an absent file is valid.

pub mod column_config;
pub mod match_config;
pub mod normcheck_config;

pub use column_config::ColumnConfig;
pub use match_config::MatchConfig;
pub use normcheck_config::NormcheckConfig;
