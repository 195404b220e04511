//! Pairwise Elo rating engine, replay, storage, and ranking
//!
//! This module holds the core of the service: the update rule that turns one
//! game's finishing order into per-player deltas, the replay fold over an
//! ordered game history, the concurrency-guarded published snapshot, and the
//! deterministic leaderboard ordering.

pub mod engine;
pub mod leaderboard;
pub mod replay;
pub mod store;

// Re-export commonly used types
pub use engine::{PairwiseElo, RatingEngine};
pub use leaderboard::rank;
pub use replay::{replay, replay_from};
pub use store::ScoreStore;
