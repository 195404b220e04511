//! CSV game source
//!
//! Reads a score sheet where each row is one game: column 0 an optional game
//! date, column 1 free-form metadata, columns 2.. the players in finishing
//! order (best first). Rows end at the first blank player cell.

use crate::error::LadderError;
use crate::source::GameSource;
use crate::types::Game;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A name cell containing one of these signals grouped participants
/// ("two-headed-giant" style rows), which the rating model does not cover.
const TEAM_MARKERS: &[char] = &['+', '&'];

/// Game source backed by a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvGameSource {
    path: PathBuf,
}

impl CsvGameSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl GameSource for CsvGameSource {
    async fn fetch_games(&self) -> crate::error::Result<Vec<Game>> {
        let contents =
            tokio::fs::read(&self.path)
                .await
                .map_err(|e| LadderError::Source {
                    message: format!(
                        "Failed to read scores file {}: {}",
                        self.path.display(),
                        e
                    ),
                })?;

        parse_games(contents.as_slice())
    }
}

/// Parse game rows from CSV data
///
/// Rows that cannot produce a valid game (too few columns, fewer than two
/// usable names, grouped participants) are skipped with a log line.
pub fn parse_games<R: Read>(reader: R) -> crate::error::Result<Vec<Game>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut games = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| LadderError::Source {
            message: format!("Error reading record {}: {}", row + 1, e),
        })?;

        if record.len() < 3 {
            debug!(row = row + 1, "skipping row with fewer than 3 columns");
            continue;
        }

        let played_at = parse_game_date(record.get(0).unwrap_or_default());

        let mut players = Vec::new();
        let mut grouped = false;
        for cell in record.iter().skip(2) {
            let name = cell.trim();
            if name.is_empty() {
                break;
            }
            if name.contains(TEAM_MARKERS) {
                grouped = true;
                break;
            }
            players.push(name.to_string());
        }

        if grouped {
            warn!(row = row + 1, "skipping grouped-participant row");
            continue;
        }
        if players.len() < 2 {
            debug!(row = row + 1, "skipping row with fewer than 2 players");
            continue;
        }

        games.push(Game { players, played_at });
    }

    Ok(games)
}

/// Parse a game date cell; unparsable cells leave the game undated
fn parse_game_date(cell: &str) -> Option<DateTime<Utc>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    ["%Y-%m-%d", "%d/%m/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}
