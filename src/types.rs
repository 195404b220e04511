//! Common types used throughout the leaderboard service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for players; exact string match, trimmed at ingestion
pub type PlayerId = String;

/// Integer Elo score for a player
pub type Rating = i32;

/// Signed change to a player's rating produced by one game
pub type RatingDelta = i32;

/// One finished game: players listed best finisher first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Finishing order, index 0 = winner
    pub players: Vec<PlayerId>,
    /// When the game was played; orders replay, never enters the rating math
    pub played_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Create a game from a finishing order with no timestamp
    pub fn new(players: Vec<PlayerId>) -> Self {
        Self {
            players,
            played_at: None,
        }
    }

    /// Create a game with an associated timestamp
    pub fn with_timestamp(players: Vec<PlayerId>, at: DateTime<Utc>) -> Self {
        Self {
            players,
            played_at: Some(at),
        }
    }

    /// Number of participants
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

/// Point-in-time mapping of player to rating
///
/// A snapshot is only ever mutated by the replay pass that owns it; the
/// published copy inside the store is swapped whole, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    ratings: HashMap<PlayerId, Rating>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Rating of a player, if they have appeared in a game
    pub fn get(&self, player: &str) -> Option<Rating> {
        self.ratings.get(player).copied()
    }

    /// Rating of a player, falling back to the given default for unseen players
    pub fn get_or(&self, player: &str, default: Rating) -> Rating {
        self.get(player).unwrap_or(default)
    }

    /// Overwrite one player's rating
    pub fn set(&mut self, player: PlayerId, rating: Rating) {
        self.ratings.insert(player, rating);
    }

    /// Fold a game's deltas into this snapshot, defaulting unseen players
    pub fn apply_deltas(&mut self, deltas: &HashMap<PlayerId, RatingDelta>, default: Rating) {
        for (player, delta) in deltas {
            let current = self.get_or(player, default);
            self.ratings.insert(player.clone(), current + delta);
        }
    }

    /// Number of rated players
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Whether any player has been rated
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Iterate over (player, rating) pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &Rating)> {
        self.ratings.iter()
    }
}

impl FromIterator<(PlayerId, Rating)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (PlayerId, Rating)>>(iter: I) -> Self {
        Self {
            ratings: iter.into_iter().collect(),
        }
    }
}

/// One row of a ranked leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    /// 1-based position on the leaderboard
    pub position: usize,
    pub player: PlayerId,
    pub rating: Rating,
}
