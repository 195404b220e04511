//! Published snapshot storage
//!
//! The one piece of shared mutable state in the service: a lock-guarded
//! holder for the currently published snapshot. Readers share the lock,
//! writers exclude everyone, and the whole-snapshot swap lets a recompute
//! publish atomically so no reader ever sees a half-replayed leaderboard.

use crate::error::LadderError;
use crate::types::{PlayerId, Rating, RatingDelta, Snapshot};
use std::collections::HashMap;
use std::sync::RwLock;

/// Concurrency-guarded container for the published snapshot
#[derive(Debug)]
pub struct ScoreStore {
    ratings: RwLock<Snapshot>,
    initial_rating: Rating,
}

impl ScoreStore {
    /// Create an empty store with the given default rating for unseen players
    pub fn new(initial_rating: Rating) -> Self {
        Self {
            ratings: RwLock::new(Snapshot::new()),
            initial_rating,
        }
    }

    /// Get one player's published rating
    pub fn get(&self, player: &str) -> crate::error::Result<Option<Rating>> {
        let ratings = self.ratings.read().map_err(|_| LadderError::Internal {
            message: "Failed to acquire ratings read lock".to_string(),
        })?;

        Ok(ratings.get(player))
    }

    /// Get a copy of the entire published snapshot
    ///
    /// The returned snapshot never aliases internal state.
    pub fn get_all(&self) -> crate::error::Result<Snapshot> {
        let ratings = self.ratings.read().map_err(|_| LadderError::Internal {
            message: "Failed to acquire ratings read lock".to_string(),
        })?;

        Ok(ratings.clone())
    }

    /// Overwrite one player's rating
    pub fn set(&self, player: PlayerId, rating: Rating) -> crate::error::Result<()> {
        let mut ratings = self.ratings.write().map_err(|_| LadderError::Internal {
            message: "Failed to acquire ratings write lock".to_string(),
        })?;

        ratings.set(player, rating);
        Ok(())
    }

    /// Add each delta to its player's rating, defaulting unseen players,
    /// atomically with respect to concurrent readers and writers
    pub fn apply_deltas(
        &self,
        deltas: &HashMap<PlayerId, RatingDelta>,
    ) -> crate::error::Result<()> {
        let mut ratings = self.ratings.write().map_err(|_| LadderError::Internal {
            message: "Failed to acquire ratings write lock".to_string(),
        })?;

        ratings.apply_deltas(deltas, self.initial_rating);
        Ok(())
    }

    /// Atomically replace the entire published snapshot
    pub fn replace_all(&self, snapshot: Snapshot) -> crate::error::Result<()> {
        let mut ratings = self.ratings.write().map_err(|_| LadderError::Internal {
            message: "Failed to acquire ratings write lock".to_string(),
        })?;

        *ratings = snapshot;
        Ok(())
    }

    /// Number of players in the published snapshot
    pub fn player_count(&self) -> crate::error::Result<usize> {
        let ratings = self.ratings.read().map_err(|_| LadderError::Internal {
            message: "Failed to acquire ratings read lock".to_string(),
        })?;

        Ok(ratings.len())
    }
}
