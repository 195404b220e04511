//! Pairwise Elo rating engine
//!
//! Treats an N-player game as all-play-all two-player contests among its
//! ranked participants: a player finishing ahead of another counts as a win
//! over them. Every pairwise expected score is taken from the pre-game
//! snapshot and all contributions are summed before anything is applied, so
//! the result does not depend on pair iteration order.

use crate::config::RatingSettings;
use crate::error::LadderError;
use crate::types::{Game, PlayerId, Rating, RatingDelta, Snapshot};
use std::collections::{HashMap, HashSet};

/// Trait for computing rating changes from one finished game
///
/// Implementations are pure over their snapshot argument and safe to call
/// from any number of threads.
pub trait RatingEngine: Send + Sync {
    /// Compute the signed integer delta for every participant of `game`,
    /// reading pre-game ratings from `snapshot`
    fn compute_deltas(
        &self,
        snapshot: &Snapshot,
        game: &Game,
    ) -> crate::error::Result<HashMap<PlayerId, RatingDelta>>;

    /// Rating assigned to players with no recorded games
    fn initial_rating(&self) -> Rating;
}

/// Canonical pairwise Elo implementation
#[derive(Debug, Clone)]
pub struct PairwiseElo {
    settings: RatingSettings,
}

impl PairwiseElo {
    /// Create a new engine, validating the rating constants
    pub fn new(settings: RatingSettings) -> crate::error::Result<Self> {
        settings.validate()?;

        Ok(Self { settings })
    }

    /// Current rating constants
    pub fn settings(&self) -> &RatingSettings {
        &self.settings
    }

    /// Expected score of a player rated `rating_a` against one rated `rating_b`
    ///
    /// Classical logistic curve: 1 / (1 + 10^((R_B - R_A) / D)).
    pub fn expected_score(&self, rating_a: f64, rating_b: f64) -> f64 {
        1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / self.settings.d_scale))
    }

    fn validate_game(&self, game: &Game) -> crate::error::Result<()> {
        if game.player_count() < 2 {
            return Err(LadderError::InvalidGame {
                reason: format!(
                    "need at least 2 players, got {}",
                    game.player_count()
                ),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for player in &game.players {
            if !seen.insert(player.as_str()) {
                return Err(LadderError::InvalidGame {
                    reason: format!("player '{}' appears more than once", player),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl Default for PairwiseElo {
    fn default() -> Self {
        Self {
            settings: RatingSettings::default(),
        }
    }
}

impl RatingEngine for PairwiseElo {
    fn compute_deltas(
        &self,
        snapshot: &Snapshot,
        game: &Game,
    ) -> crate::error::Result<HashMap<PlayerId, RatingDelta>> {
        self.validate_game(game)?;

        let n = game.player_count();

        // Pre-game ratings come from a single snapshot read; nothing below
        // observes a partially updated state.
        let ratings: Vec<f64> = game
            .players
            .iter()
            .map(|p| snapshot.get_or(p, self.settings.initial_rating) as f64)
            .collect();

        // Player at index i finished ahead of player at index j, so every
        // (i, j) pair with i < j is a win for i.
        let mut deltas = vec![0.0f64; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let expected = self.expected_score(ratings[i], ratings[j]);
                let gain = self.settings.k_factor * (1.0 - expected);

                deltas[i] += gain;
                deltas[j] -= gain;
            }
        }

        // f64::round rounds half away from zero
        Ok(game
            .players
            .iter()
            .zip(deltas)
            .map(|(player, delta)| (player.clone(), delta.round() as RatingDelta))
            .collect())
    }

    fn initial_rating(&self) -> Rating {
        self.settings.initial_rating
    }
}
