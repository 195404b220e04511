//! Elo Ladder - Multi-player Elo leaderboard service
//!
//! This crate replays an ordered history of multi-player games through a
//! pairwise Elo rating engine and publishes the resulting leaderboard over
//! HTTP, as JSON, HTML, or terminal output.

pub mod config;
pub mod error;
pub mod metrics;
pub mod rating;
pub mod render;
pub mod service;
pub mod source;
pub mod types;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use rating::{rank, replay, PairwiseElo, RatingEngine, ScoreStore};
pub use source::{CsvGameSource, GameSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
