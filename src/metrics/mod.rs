//! Metrics and monitoring for the elo-ladder service
//!
//! Prometheus metrics covering refresh outcomes, replay volume, and the size
//! of the published leaderboard.

pub mod collector;

pub use collector::{MetricsCollector, RefreshMetrics, ServiceMetrics};
