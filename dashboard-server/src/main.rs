//! FraudGuard Dashboard Server
//!
//! Aggregates the transaction dataset into summary statistics and
//! chart-ready figures for a single-page dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │              DASHBOARD SERVER                  │
//! ├────────────────────────────────────────────────┤
//! │  ┌───────────┐        ┌─────────────────────┐  │
//! │  │  Page +   │        │  Aggregations       │  │
//! │  │  Figure   │───────▶│  (pure, per chart)  │  │
//! │  │  Routes   │        │                     │  │
//! │  └───────────┘        └──────────┬──────────┘  │
//! │                                  ▼             │
//! │                     ┌─────────────────────┐    │
//! │                     │  In-memory dataset  │    │
//! │                     │  (CSV, read-only)   │    │
//! │                     └─────────────────────┘    │
//! └────────────────────────────────────────────────┘
//! ```

mod charts;
mod config;
mod dataset;
mod handlers;

use axum::{Router, routing::get};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;
use std::sync::Arc;

use dataset::Dataset;

#[tokio::main]
async fn main() {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (JSON output in production)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fraudguard_dashboard=debug,tower_http=debug".into());
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("FraudGuard Dashboard starting...");
    tracing::info!("Dataset: {}", config.dataset_path);

    // Load the dataset. A missing or malformed file is fatal.
    let dataset = Dataset::load(&config.dataset_path)
        .expect("Failed to load transaction dataset");
    tracing::info!(
        "Dataset loaded: {} transactions, {} fraud cases",
        dataset.len(),
        dataset.total_fraud()
    );

    // Build application state
    let state = AppState {
        dataset: Arc::new(dataset),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(handlers::health::check))
        .route("/api/v1/summary", get(handlers::summary::get))
        .route("/api/v1/charts/fraud-trend", get(handlers::charts::fraud_trend))
        .route("/api/v1/charts/fraud-map", get(handlers::charts::fraud_map))
        .route("/api/v1/charts/fraud-by-device", get(handlers::charts::fraud_by_device))
        .route("/api/v1/charts/fraud-by-source", get(handlers::charts::fraud_by_source))
        .route("/api/v1/charts/fraud-by-browser", get(handlers::charts::fraud_by_browser))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
