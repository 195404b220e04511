//! Leaderboard rendering for terminals and HTML pages

use crate::types::RankEntry;
use std::fmt::Write;

/// Render ranked rows for terminal output, one `rank --- player --- rating`
/// line per player
pub fn text_table(entries: &[RankEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{} --- {} --- {}",
            entry.position, entry.player, entry.rating
        );
    }
    out
}

/// Render ranked rows as a minimal standalone HTML table
pub fn html_table(entries: &[RankEntry]) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head><title>Player Rankings</title></head>\n<body>\n\
         <table>\n<tr><th>Rank</th><th>Player</th><th>Rating</th></tr>\n",
    );
    for entry in entries {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.position,
            escape_html(&entry.player),
            entry.rating
        );
    }
    out.push_str("</table>\n</body>\n</html>\n");
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
