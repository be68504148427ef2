//! Climate Query API Server
//!
//! Read-only JSON endpoints over the station and measurement dataset.

use anyhow::Context;
use axum::{http::Method, routing::get, Router};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
pub mod rate_limit;
pub mod routes;

pub use self::config::ServerConfig;
pub use error::{ApiError, ErrorResponse};

use storage::Repository;

/// Application state shared across handlers
pub struct AppState {
    /// Read-only dataset handle
    pub repository: Repository,
}

impl AppState {
    /// Create new application state
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/", get(routes::index::list_routes))
        .route(
            "/api/v1.0/precipitation",
            get(routes::precipitation::get_precipitation),
        )
        .route("/api/v1.0/stations", get(routes::stations::get_stations))
        .route("/api/v1.0/tobs", get(routes::tobs::get_tobs))
        .route("/api/v1.0/:start", get(routes::stats::get_stats_from))
        .route("/api/v1.0/:start/:end", get(routes::stats::get_stats_between))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Initialize logging. A subscriber installed earlier is left in place.
pub fn init_logging(level: Level, json: bool) {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    if result.is_err() {
        debug!("Tracing subscriber already installed");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the server until Ctrl-C
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let repository = Repository::connect(&config.database_url, config.max_connections)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    if let Some(addr) = config.metrics_addr {
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("failed to install metrics exporter")?;
        info!("Serving metrics on {}", addr);
    }

    let state = Arc::new(AppState::new(repository.clone()));
    let mut app = create_router(state);

    if config.rate_limit.enabled {
        app = app.layer(rate_limit::rate_limit_layer(&config.rate_limit)?);
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("Starting API server on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    repository.close().await;
    info!("Server stopped");

    Ok(())
}
