//! FraudGuard Prediction Service
//!
//! Serves pre-trained fraud classifiers over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │            PREDICTION SERVICE                  │
//! ├────────────────────────────────────────────────┤
//! │  ┌───────────┐        ┌─────────────────────┐  │
//! │  │  API      │        │  Inference          │  │
//! │  │  Routes   │───────▶│  (ONNX Runtime)     │  │
//! │  │  (Axum)   │        │                     │  │
//! │  └───────────┘        └─────────────────────┘  │
//! │        model artifacts loaded at startup       │
//! └────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod model;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;
use std::sync::Arc;

use model::{Classifier, OnnxClassifier};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (JSON output in production)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fraudguard_prediction=debug,tower_http=debug".into());
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

    tracing::info!("FraudGuard Prediction Service starting...");
    tracing::info!("Fraud model: {}", config.fraud_model_path);
    tracing::info!("Credit card model: {}", config.credit_card_model_path);

    // Load model artifacts. Missing artifacts are fatal.
    let fraud_model = OnnxClassifier::load("fraud_detection", &config.fraud_model_path)
        .expect("Failed to load fraud detection model");
    let credit_card_model =
        OnnxClassifier::load("credit_card_fraud", &config.credit_card_model_path)
            .expect("Failed to load credit card fraud model");

    // Build application state
    let state = AppState {
        fraud_model: Arc::new(fraud_model),
        credit_card_model: Arc::new(credit_card_model),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub fraud_model: Arc<dyn Classifier>,
    pub credit_card_model: Arc<dyn Classifier>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict_fraud", post(handlers::predict::predict_fraud))
        .route("/predict_credit_card_fraud", post(handlers::predict::predict_credit_card_fraud))
        .route("/api/v1/models", get(handlers::models::list))
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
