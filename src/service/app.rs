//! Main application state and refresh orchestration
//!
//! This module contains the AppState that owns the score store, rating
//! engine, game source, and metrics, and drives the fetch → sort → replay →
//! publish cycle.

use crate::config::AppConfig;
use crate::metrics::MetricsCollector;
use crate::rating::engine::{PairwiseElo, RatingEngine};
use crate::rating::replay::replay;
use crate::rating::store::ScoreStore;
use crate::source::{sort_chronologically, CsvGameSource, GameSource};
use crate::types::Game;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Outcome of one successful refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSummary {
    /// Games folded into the new snapshot
    pub games_replayed: usize,
    /// Players on the new leaderboard
    pub players_rated: usize,
    /// Wall time of the whole refresh
    pub duration_ms: u64,
}

/// Main application state containing all service components
pub struct AppState {
    config: AppConfig,
    store: Arc<ScoreStore>,
    engine: Arc<dyn RatingEngine>,
    source: Arc<dyn GameSource>,
    metrics: Arc<MetricsCollector>,
    started_at: Instant,
}

impl AppState {
    /// Initialize the application with the CSV source from the config
    pub fn new(config: AppConfig) -> crate::error::Result<Self> {
        let source = Arc::new(CsvGameSource::new(&config.source.csv_path));
        Self::with_source(config, source)
    }

    /// Initialize the application with a custom game source
    pub fn with_source(
        config: AppConfig,
        source: Arc<dyn GameSource>,
    ) -> crate::error::Result<Self> {
        let engine = Arc::new(PairwiseElo::new(config.rating.clone())?);
        let store = Arc::new(ScoreStore::new(config.rating.initial_rating));
        let metrics =
            Arc::new(MetricsCollector::new().context("Failed to create metrics collector")?);

        Ok(Self {
            config,
            store,
            engine,
            source,
            metrics,
            started_at: Instant::now(),
        })
    }

    /// Get service configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the published score store
    pub fn store(&self) -> Arc<ScoreStore> {
        self.store.clone()
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Time elapsed since the service was initialized
    pub fn uptime(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Recompute the leaderboard from the game source and publish it
    ///
    /// On any failure the previously published snapshot stays untouched;
    /// the new snapshot is swapped in whole only after a complete replay.
    pub async fn refresh(&self) -> crate::error::Result<RefreshSummary> {
        let started = Instant::now();

        match self.recompute().await {
            Ok((games_replayed, players_rated)) => {
                let duration = started.elapsed();
                self.metrics
                    .record_refresh_success(games_replayed, players_rated, duration);
                info!(
                    games = games_replayed,
                    players = players_rated,
                    duration_ms = duration.as_millis() as u64,
                    "leaderboard refreshed"
                );

                Ok(RefreshSummary {
                    games_replayed,
                    players_rated,
                    duration_ms: duration.as_millis() as u64,
                })
            }
            Err(e) => {
                self.metrics.record_refresh_failure();
                error!("leaderboard refresh failed: {:#}", e);
                Err(e)
            }
        }
    }

    async fn recompute(&self) -> crate::error::Result<(usize, usize)> {
        let mut games = self.source.fetch_games().await?;
        sort_chronologically(&mut games);

        let window = self.config.rating.replay_window;
        let snapshot = replay(&games, self.engine.as_ref(), window)?;

        let games_replayed = replayed_slice(&games, window)
            .iter()
            .filter(|game| game.player_count() >= 2)
            .count();
        let players_rated = snapshot.len();

        self.store.replace_all(snapshot)?;
        Ok((games_replayed, players_rated))
    }
}

/// The trailing slice the replay actually folds when a window is set
fn replayed_slice(games: &[Game], window: Option<usize>) -> &[Game] {
    match window {
        Some(w) if w > 0 && games.len() > w => &games[games.len() - w..],
        _ => games,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn game_of(players: &[&str]) -> Game {
        Game::new(players.iter().map(|p| p.to_string()).collect())
    }

    struct StaticSource {
        games: Vec<Game>,
    }

    #[async_trait::async_trait]
    impl GameSource for StaticSource {
        async fn fetch_games(&self) -> crate::error::Result<Vec<Game>> {
            Ok(self.games.clone())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl GameSource for FailingSource {
        async fn fetch_games(&self) -> crate::error::Result<Vec<Game>> {
            Err(crate::error::LadderError::Source {
                message: "unreachable".to_string(),
            }
            .into())
        }
    }

    #[tokio::test]
    async fn test_refresh_publishes_a_snapshot() {
        let source = Arc::new(StaticSource {
            games: vec![game_of(&["alice", "bob"])],
        });
        let app = AppState::with_source(AppConfig::default(), source).unwrap();

        let summary = app.refresh().await.unwrap();

        assert_eq!(summary.games_replayed, 1);
        assert_eq!(summary.players_rated, 2);
        assert_eq!(app.store().get("alice").unwrap(), Some(1520));
    }

    #[tokio::test]
    async fn test_refresh_sorts_games_before_replay() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        // Delivered newest first; replay must still run oldest first
        let source = Arc::new(StaticSource {
            games: vec![
                Game::with_timestamp(vec!["bob".to_string(), "alice".to_string()], late),
                Game::with_timestamp(vec!["alice".to_string(), "bob".to_string()], early),
            ],
        });
        let app = AppState::with_source(AppConfig::default(), source).unwrap();
        app.refresh().await.unwrap();

        // The comeback win is worth more than the opening one, so bob ends ahead
        let store = app.store();
        assert!(store.get("bob").unwrap() > store.get("alice").unwrap());
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_published_state_untouched() {
        let source = Arc::new(StaticSource {
            games: vec![game_of(&["alice", "bob"])],
        });
        let app = AppState::with_source(AppConfig::default(), source).unwrap();
        app.refresh().await.unwrap();

        // Swap in a failing source by rebuilding state around the same store
        let broken = AppState {
            config: app.config.clone(),
            store: app.store.clone(),
            engine: app.engine.clone(),
            source: Arc::new(FailingSource),
            metrics: app.metrics.clone(),
            started_at: app.started_at,
        };

        assert!(broken.refresh().await.is_err());
        assert_eq!(broken.store().get("alice").unwrap(), Some(1520));
        assert_eq!(broken.store().player_count().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_refresh_honors_replay_window() {
        let games = vec![
            game_of(&["carol", "alice"]),
            game_of(&["alice", "bob"]),
            game_of(&["alice", "bob"]),
        ];
        let mut config = AppConfig::default();
        config.rating.replay_window = Some(2);

        let app =
            AppState::with_source(config, Arc::new(StaticSource { games })).unwrap();
        let summary = app.refresh().await.unwrap();

        // carol's game falls outside the trailing window
        assert_eq!(summary.games_replayed, 2);
        assert_eq!(app.store().get("carol").unwrap(), None);
    }
}
