//! Main entry point for the Elo Ladder leaderboard service
//!
//! One binary, two modes: the default one-shot mode replays the score sheet
//! and prints the ranked table; `--serve` publishes the leaderboard over HTTP
//! with graceful shutdown.

use anyhow::Result;
use clap::Parser;
use elo_ladder::config::{validate_config, AppConfig};
use elo_ladder::rating::{rank, replay, PairwiseElo};
use elo_ladder::render;
use elo_ladder::service::{AppState, HttpServer, HttpServerConfig};
use elo_ladder::source::{sort_chronologically, CsvGameSource, GameSource};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Elo Ladder - Multi-player Elo Leaderboard
#[derive(Parser)]
#[command(
    name = "elo-ladder",
    version,
    about = "Replays a multi-player game history into an Elo leaderboard",
    long_about = "Elo Ladder folds an ordered history of multi-player games into player \
                 ratings using pairwise Elo, then prints the ranked table or serves it \
                 over HTTP as JSON and HTML."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Scores file override
    #[arg(long, value_name = "FILE", help = "Override the scores CSV path")]
    csv: Option<PathBuf>,

    /// Serve the leaderboard over HTTP instead of printing it
    #[arg(long, help = "Run the HTTP leaderboard service")]
    serve: bool,

    /// HTTP port override
    #[arg(long, value_name = "PORT", help = "Override HTTP server port")]
    http_port: Option<u16>,

    /// Replay window override
    #[arg(
        long,
        value_name = "GAMES",
        help = "Replay only the most recent N games"
    )]
    window: Option<usize>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without running"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment/file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(csv) = &args.csv {
        config.source.csv_path = csv.clone();
    }

    if let Some(http_port) = args.http_port {
        config.service.http_port = http_port;
    }

    if let Some(window) = args.window {
        config.rating.replay_window = Some(window);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Display startup banner with service information
fn display_startup_banner(config: &AppConfig) {
    info!("Elo Ladder");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   Scores file: {}", config.source.csv_path.display());
    info!("   K-factor: {}", config.rating.k_factor);
    info!("   D-scale: {}", config.rating.d_scale);
    match config.rating.replay_window {
        Some(window) => info!("   Replay window: {} games", window),
        None => info!("   Replay window: full history"),
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

/// One-shot mode: replay the score sheet and print the ranked table
async fn run_report(config: AppConfig) -> Result<()> {
    info!("Analyzing scores from {}", config.source.csv_path.display());

    let source = CsvGameSource::new(&config.source.csv_path);
    let engine = PairwiseElo::new(config.rating.clone())?;

    let mut games = source.fetch_games().await?;
    sort_chronologically(&mut games);

    let snapshot = replay(&games, &engine, config.rating.replay_window)?;
    let ranked = rank(&snapshot);

    print!("{}", render::text_table(&ranked));
    Ok(())
}

/// Service mode: publish the leaderboard over HTTP until shutdown
async fn run_service(config: AppConfig) -> Result<()> {
    let app = Arc::new(AppState::new(config.clone())?);

    // A failed initial refresh is not fatal: the service starts with an empty
    // leaderboard and a later POST /refresh can recover once the source is back
    if let Err(e) = app.refresh().await {
        error!("Initial refresh failed, serving empty leaderboard: {:#}", e);
    }

    let server = Arc::new(HttpServer::new(
        HttpServerConfig {
            port: config.service.http_port,
            host: "0.0.0.0".to_string(),
        },
        app,
    ));

    let server_task = {
        let server = server.clone();
        tokio::spawn(async move { server.start().await })
    };

    info!("Elo Ladder service is running");
    info!("Press Ctrl+C to shutdown gracefully...");

    wait_for_shutdown_signal().await;

    info!("Shutdown signal received, stopping leaderboard server...");
    server.stop();

    match tokio::time::timeout(config.shutdown_timeout(), server_task).await {
        Ok(Ok(Ok(()))) => info!("Graceful shutdown completed"),
        Ok(Ok(Err(e))) => error!("Leaderboard server error during shutdown: {:#}", e),
        Ok(Err(e)) => error!("Leaderboard server task panicked: {}", e),
        Err(_) => warn!("Shutdown timeout exceeded, forcing exit"),
    }

    info!("Elo Ladder service stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        info!("Dry run completed - exiting without running");
        return Ok(());
    }

    if args.serve {
        display_startup_banner(&config);
        run_service(config).await
    } else {
        run_report(config).await
    }
}
