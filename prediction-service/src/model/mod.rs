//! Model Module - Classifier Inference
//!
//! Keeps inference behind a trait so handlers stay decoupled from the
//! runtime and tests can substitute a stub.

pub mod inference;

pub use inference::{Classifier, InferenceError, ModelInfo, OnnxClassifier};

#[cfg(test)]
pub use inference::testing;
