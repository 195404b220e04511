//! Game sources
//!
//! A source supplies the core with an ordered list of finished games and is
//! responsible for filtering rows the engine must never see: blank names,
//! grouped-participant markers, rows with fewer than two finishers.

pub mod csv;

use crate::types::Game;
use async_trait::async_trait;

// Re-export commonly used types
pub use self::csv::CsvGameSource;

/// Trait for fetching the full game history
#[async_trait]
pub trait GameSource: Send + Sync {
    /// Fetch all recorded games, in source order
    async fn fetch_games(&self) -> crate::error::Result<Vec<Game>>;
}

/// Sort games ascending by timestamp for replay
///
/// The sort is stable, so undated games and same-day games keep their source
/// order.
pub fn sort_chronologically(games: &mut [Game]) {
    games.sort_by_key(|game| game.played_at);
}
