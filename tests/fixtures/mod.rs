//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use elo_ladder::error::LadderError;
use elo_ladder::source::GameSource;
use elo_ladder::types::Game;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Game source whose history and failure mode can be changed mid-test
pub struct ScriptedGameSource {
    games: Mutex<Vec<Game>>,
    fail: AtomicBool,
    fetch_count: AtomicUsize,
}

impl ScriptedGameSource {
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            games: Mutex::new(games),
            fail: AtomicBool::new(false),
            fetch_count: AtomicUsize::new(0),
        }
    }

    /// Replace the game history returned by subsequent fetches
    pub fn set_games(&self, games: Vec<Game>) {
        *self.games.lock().unwrap() = games;
    }

    /// Make subsequent fetches fail (or succeed again)
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of fetches performed
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameSource for ScriptedGameSource {
    async fn fetch_games(&self) -> elo_ladder::error::Result<Vec<Game>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(LadderError::Source {
                message: "scripted failure".to_string(),
            }
            .into());
        }

        Ok(self.games.lock().unwrap().clone())
    }
}

/// Build a game from a finishing order of names
pub fn game_of(players: &[&str]) -> Game {
    Game::new(players.iter().map(|p| p.to_string()).collect())
}

static TEMP_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write CSV contents to a unique temp file and return its path
pub fn temp_csv(contents: &str) -> PathBuf {
    let unique = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "elo-ladder-test-{}-{}.csv",
        std::process::id(),
        unique
    ));
    std::fs::write(&path, contents).expect("failed to write temp csv");
    path
}
