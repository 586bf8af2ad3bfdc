//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the fraud detection model artifact
    pub fraud_model_path: String,

    /// Path to the credit card fraud model artifact
    pub credit_card_model_path: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            fraud_model_path: env::var("FRAUD_MODEL_PATH")
                .unwrap_or_else(|_| "models/fraud_detection.onnx".to_string()),

            credit_card_model_path: env::var("CREDIT_CARD_MODEL_PATH")
                .unwrap_or_else(|_| "models/credit_card_fraud.onnx".to_string()),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
