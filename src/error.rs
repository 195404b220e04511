//! Error types for the leaderboard service
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific leaderboard scenarios
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Invalid game: {reason}")]
    InvalidGame { reason: String },

    #[error("Game source error: {message}")]
    Source { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal service error: {message}")]
    Internal { message: String },
}
