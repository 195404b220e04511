//! Configuration management for the elo-ladder service
//!
//! This module handles all configuration loading from environment variables,
//! TOML files, validation, and default values for the leaderboard service.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, SourceSettings};
pub use rating::RatingSettings;
