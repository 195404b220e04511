//! Metrics collection using Prometheus

use anyhow::Result;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use std::time::Duration;

/// Main metrics collector for the leaderboard service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Refresh and replay metrics
    refresh_metrics: RefreshMetrics,

    /// Service-level metrics
    service_metrics: ServiceMetrics,
}

/// Refresh and replay metrics
#[derive(Clone)]
pub struct RefreshMetrics {
    /// Total recomputes by outcome (success/failure)
    pub refreshes_total: IntCounterVec,

    /// Total games folded into snapshots
    pub games_replayed_total: IntCounter,

    /// Wall time of one full replay
    pub replay_duration_seconds: Histogram,
}

/// Service-level metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    /// Players on the published leaderboard
    pub players_rated: IntGauge,

    /// Service uptime in seconds
    pub uptime_seconds: IntGauge,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let refresh_metrics = RefreshMetrics::new(&registry)?;
        let service_metrics = ServiceMetrics::new(&registry)?;

        Ok(Self {
            registry,
            refresh_metrics,
            service_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get refresh metrics
    pub fn refresh(&self) -> &RefreshMetrics {
        &self.refresh_metrics
    }

    /// Get service metrics
    pub fn service(&self) -> &ServiceMetrics {
        &self.service_metrics
    }

    /// Record a completed recompute
    pub fn record_refresh_success(
        &self,
        games_replayed: usize,
        players_rated: usize,
        duration: Duration,
    ) {
        self.refresh_metrics
            .refreshes_total
            .with_label_values(&["success"])
            .inc();
        self.refresh_metrics
            .games_replayed_total
            .inc_by(games_replayed as u64);
        self.refresh_metrics
            .replay_duration_seconds
            .observe(duration.as_secs_f64());
        self.service_metrics
            .players_rated
            .set(players_rated as i64);
    }

    /// Record a recompute that failed and left the published snapshot untouched
    pub fn record_refresh_failure(&self) {
        self.refresh_metrics
            .refreshes_total
            .with_label_values(&["failure"])
            .inc();
    }
}

impl RefreshMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let refreshes_total = IntCounterVec::new(
            Opts::new("ladder_refreshes_total", "Total leaderboard recomputes"),
            &["outcome"],
        )?;
        registry.register(Box::new(refreshes_total.clone()))?;

        let games_replayed_total = IntCounter::with_opts(Opts::new(
            "ladder_games_replayed_total",
            "Total games folded into published snapshots",
        ))?;
        registry.register(Box::new(games_replayed_total.clone()))?;

        let replay_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "ladder_replay_duration_seconds",
            "Wall time of one full replay pass",
        ))?;
        registry.register(Box::new(replay_duration_seconds.clone()))?;

        Ok(Self {
            refreshes_total,
            games_replayed_total,
            replay_duration_seconds,
        })
    }
}

impl ServiceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let players_rated = IntGauge::with_opts(Opts::new(
            "ladder_players_rated",
            "Players on the published leaderboard",
        ))?;
        registry.register(Box::new(players_rated.clone()))?;

        let uptime_seconds = IntGauge::with_opts(Opts::new(
            "ladder_uptime_seconds",
            "Service uptime in seconds",
        ))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            players_rated,
            uptime_seconds,
        })
    }
}
