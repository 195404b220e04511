//! Service coordination and HTTP presentation
//!
//! Wires the game source, rating engine, and score store together and exposes
//! the published leaderboard over HTTP.

pub mod app;
pub mod http;

// Re-export commonly used types
pub use app::{AppState, RefreshSummary};
pub use http::{HttpServer, HttpServerConfig};
