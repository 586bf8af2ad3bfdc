//! ONNX Runtime integration.
//!
//! Each classifier artifact is deserialized once at startup and held for
//! the process lifetime. Sessions require exclusive access to run, so the
//! session sits behind a mutex; everything else is read-only.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use ndarray::Array2;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;
use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("model not found: {0}")]
    ModelNotFound(String),

    #[error("failed to build session: {0}")]
    SessionError(String),

    #[error("bad input tensor: {0}")]
    TensorError(String),

    #[error("inference failed: {0}")]
    ExecutionError(String),
}

/// Model metadata and rolling inference stats for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub model_path: String,
    pub loaded_at: DateTime<Utc>,
    pub inference_count: u64,
    pub avg_latency_ms: f32,
}

/// Inference seam between HTTP handlers and the runtime.
pub trait Classifier: Send + Sync {
    /// Run the classifier on a single feature vector, returning its label.
    fn predict_label(&self, features: &[f32]) -> Result<i64, InferenceError>;

    /// Metadata and stats for this model.
    fn info(&self) -> ModelInfo;
}

/// A classifier artifact loaded into an ONNX Runtime session.
#[derive(Debug)]
pub struct OnnxClassifier {
    name: String,
    model_path: String,
    session: Mutex<Session>,
    loaded_at: DateTime<Utc>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl OnnxClassifier {
    /// Load an ONNX artifact from disk.
    pub fn load(name: &str, model_path: &str) -> Result<Self, InferenceError> {
        tracing::info!("Loading ONNX model '{}' from: {}", name, model_path);

        if !Path::new(model_path).exists() {
            return Err(InferenceError::ModelNotFound(model_path.to_string()));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError::SessionError(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::SessionError(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError::SessionError(e.to_string()))?;

        tracing::info!("ONNX model '{}' loaded successfully", name);

        Ok(Self {
            name: name.to_string(),
            model_path: model_path.to_string(),
            session: Mutex::new(session),
            loaded_at: Utc::now(),
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict_label(&self, features: &[f32]) -> Result<i64, InferenceError> {
        let start_time = std::time::Instant::now();

        // Single-row input: [1, n_features]
        let input_array = Array2::<f32>::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| InferenceError::TensorError(e.to_string()))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::TensorError(e.to_string()))?;

        let mut session = self.session.lock();

        // Classifier graphs emit the label as their first output.
        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError::ExecutionError("model has no outputs".to_string()))?;

        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::ExecutionError(e.to_string()))?;

        let output = outputs.get(&output_name)
            .ok_or_else(|| InferenceError::ExecutionError("missing label output".to_string()))?;

        // Integer class labels come out as i64; some exports emit f32.
        let label = match output.try_extract_tensor::<i64>() {
            Ok((_, data)) => data.first().copied()
                .ok_or_else(|| InferenceError::ExecutionError("empty label output".to_string()))?,
            Err(_) => {
                let (_, data) = output.try_extract_tensor::<f32>()
                    .map_err(|e| InferenceError::ExecutionError(e.to_string()))?;
                let value = data.first().copied()
                    .ok_or_else(|| InferenceError::ExecutionError("empty label output".to_string()))?;
                value.round() as i64
            }
        };

        let elapsed = start_time.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(label)
    }

    fn info(&self) -> ModelInfo {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        ModelInfo {
            name: self.name.clone(),
            model_path: self.model_path.clone(),
            loaded_at: self.loaded_at,
            inference_count: count,
            avg_latency_ms: avg,
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Fixed-label classifier for handler tests.
    pub struct StubClassifier {
        pub label: i64,
    }

    impl Classifier for StubClassifier {
        fn predict_label(&self, features: &[f32]) -> Result<i64, InferenceError> {
            if features.is_empty() {
                return Err(InferenceError::TensorError("empty feature vector".to_string()));
            }
            Ok(self.label)
        }

        fn info(&self) -> ModelInfo {
            ModelInfo {
                name: "stub".to_string(),
                model_path: "<memory>".to_string(),
                loaded_at: Utc::now(),
                inference_count: 0,
                avg_latency_ms: 0.0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_is_an_error() {
        let err = OnnxClassifier::load("missing", "models/does_not_exist.onnx").unwrap_err();
        match err {
            InferenceError::ModelNotFound(path) => {
                assert_eq!(path, "models/does_not_exist.onnx")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn error_messages_name_the_failure() {
        let err = InferenceError::TensorError("shape mismatch".to_string());
        assert_eq!(err.to_string(), "bad input tensor: shape mismatch");
    }
}
