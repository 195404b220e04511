//! HTTP endpoints for the published leaderboard
//!
//! This module serves the snapshot and ranking as JSON, an HTML table, health
//! and Prometheus metrics endpoints, and a refresh trigger, using Axum.

use crate::rating::leaderboard::rank;
use crate::render;
use crate::service::app::AppState;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host to bind to (typically "0.0.0.0" for all interfaces)
    pub host: String,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub app: Arc<AppState>,
}

/// HTTP server exposing the leaderboard and monitoring endpoints
pub struct HttpServer {
    config: HttpServerConfig,
    state: HttpState,
    shutdown_tx: broadcast::Sender<()>,
}

impl HttpServer {
    /// Create a new HTTP server around the application state
    pub fn new(config: HttpServerConfig, app: Arc<AppState>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            state: HttpState { app },
            shutdown_tx,
        }
    }

    /// Start the server; returns when a shutdown signal is received
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .context("Invalid HTTP server address")?;

        let app = self.create_router();
        let listener = TcpListener::bind(addr).await?;

        info!("Leaderboard server listening on http://{}", addr);

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("Leaderboard server shutdown signal received");
            })
            .await?;

        info!("Leaderboard server stopped");
        Ok(())
    }

    /// Create the Axum router with all endpoints
    fn create_router(&self) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .route("/ratings", get(ratings_handler))
            .route("/leaderboard", get(leaderboard_handler))
            .route("/leaderboard/html", get(leaderboard_html_handler))
            .route("/refresh", post(refresh_handler))
            .with_state(self.state.clone())
    }

    /// Stop the server
    pub fn stop(&self) {
        if let Err(e) = self.shutdown_tx.send(()) {
            warn!("Failed to send shutdown signal to leaderboard server: {}", e);
        }
    }
}

/// Root endpoint handler - shows service information
async fn root_handler() -> impl IntoResponse {
    let info = json!({
        "service": "elo-ladder",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/metrics",
            "/ratings",
            "/leaderboard",
            "/leaderboard/html",
            "/refresh"
        ]
    });

    Json(info)
}

/// Lightweight health check endpoint handler
async fn health_handler(State(state): State<HttpState>) -> impl IntoResponse {
    debug!("Health check requested");

    match state.app.store().player_count() {
        Ok(players) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": "elo-ladder",
                "version": env!("CARGO_PKG_VERSION"),
                "players_rated": players
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": "elo-ladder",
                "error": e.to_string()
            })),
        ),
    }
}

/// Prometheus metrics endpoint handler
async fn metrics_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let metrics = state.app.metrics();
    metrics
        .service()
        .uptime_seconds
        .set(state.app.uptime().as_secs() as i64);

    let families = metrics.registry().gather();
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    match encoder.encode(&families, &mut buffer) {
        Ok(()) => match String::from_utf8(buffer) {
            Ok(body) => (StatusCode::OK, body),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            ),
        },
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to gather metrics: {}", e),
        ),
    }
}

/// Published snapshot as a JSON object keyed by player name
async fn ratings_handler(State(state): State<HttpState>) -> impl IntoResponse {
    match state.app.store().get_all() {
        Ok(snapshot) => (StatusCode::OK, Json(json!(snapshot))),
        Err(e) => internal_error(e),
    }
}

/// Ranked leaderboard as a JSON array
async fn leaderboard_handler(State(state): State<HttpState>) -> impl IntoResponse {
    match state.app.store().get_all() {
        Ok(snapshot) => (StatusCode::OK, Json(json!(rank(&snapshot)))),
        Err(e) => internal_error(e),
    }
}

/// Ranked leaderboard as an HTML table
async fn leaderboard_html_handler(
    State(state): State<HttpState>,
) -> Result<Html<String>, (StatusCode, Json<serde_json::Value>)> {
    match state.app.store().get_all() {
        Ok(snapshot) => Ok(Html(render::html_table(&rank(&snapshot)))),
        Err(e) => Err(internal_error(e)),
    }
}

/// Trigger a recompute from the game source
///
/// A failed recompute answers 500 and leaves the published snapshot exactly
/// as it was.
async fn refresh_handler(State(state): State<HttpState>) -> impl IntoResponse {
    match state.app.refresh().await {
        Ok(summary) => (StatusCode::OK, Json(json!(summary))),
        Err(e) => internal_error(e),
    }
}

fn internal_error(e: anyhow::Error) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("{:#}", e) })),
    )
}
