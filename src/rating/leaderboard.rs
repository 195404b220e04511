//! Deterministic leaderboard ordering

use crate::types::{RankEntry, Snapshot};

/// Rank a snapshot: rating descending, player name ascending on ties
///
/// The name tiebreaker makes the ordering reproducible regardless of map
/// iteration order. Positions are numbered 1..n in sequence.
pub fn rank(snapshot: &Snapshot) -> Vec<RankEntry> {
    let mut rows: Vec<(String, i32)> = snapshot
        .iter()
        .map(|(player, rating)| (player.clone(), *rating))
        .collect();

    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    rows.into_iter()
        .enumerate()
        .map(|(i, (player, rating))| RankEntry {
            position: i + 1,
            player,
            rating,
        })
        .collect()
}
