//! Prediction handlers
//!
//! One endpoint per loaded model. The only client-side validation is the
//! presence of the `features` key; a malformed vector surfaces as an
//! inference failure like any other.

use axum::extract::{Json, State};
use serde::Serialize;
use serde_json::Value;

use crate::model::Classifier;
use crate::{AppError, AppResult, AppState};

const MISSING_FEATURES: &str = "Invalid input: 'features' key is missing";

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: i64,
}

/// Fraud detection endpoint
pub async fn predict_fraud(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> AppResult<Json<PredictResponse>> {
    run_prediction("fraud detection", state.fraud_model.as_ref(), payload)
}

/// Credit card fraud detection endpoint
pub async fn predict_credit_card_fraud(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> AppResult<Json<PredictResponse>> {
    run_prediction(
        "credit card fraud detection",
        state.credit_card_model.as_ref(),
        payload,
    )
}

fn run_prediction(
    context: &str,
    model: &dyn Classifier,
    payload: Option<Json<Value>>,
) -> AppResult<Json<PredictResponse>> {
    let payload = payload.map(|Json(value)| value);

    // Diagnostic log of every received payload
    match &payload {
        Some(data) => tracing::info!("Received data for {}: {}", context, data),
        None => tracing::info!("Received data for {}: <no parseable body>", context),
    }

    let features = payload
        .as_ref()
        .and_then(|data| data.get("features"))
        .ok_or_else(|| AppError::InvalidInput(MISSING_FEATURES.to_string()))?;

    let features = parse_features(features)?;
    let prediction = model.predict_label(&features)?;

    Ok(Json(PredictResponse { prediction }))
}

fn parse_features(value: &Value) -> Result<Vec<f32>, AppError> {
    let items = value
        .as_array()
        .ok_or_else(|| AppError::InternalError("'features' is not an array".to_string()))?;

    items
        .iter()
        .map(|item| {
            item.as_f64().map(|f| f as f32).ok_or_else(|| {
                AppError::InternalError("'features' contains a non-numeric value".to_string())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::StubClassifier;
    use serde_json::json;

    #[test]
    fn missing_features_key_is_rejected() {
        let model = StubClassifier { label: 1 };
        let err = run_prediction("test", &model, Some(Json(json!({"rows": [1, 2]}))))
            .unwrap_err();

        match err {
            AppError::InvalidInput(msg) => {
                assert_eq!(msg, "Invalid input: 'features' key is missing")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn absent_body_is_rejected_like_missing_key() {
        let model = StubClassifier { label: 1 };
        let err = run_prediction("test", &model, None).unwrap_err();

        match err {
            AppError::InvalidInput(msg) => {
                assert_eq!(msg, "Invalid input: 'features' key is missing")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn null_body_is_rejected_like_missing_key() {
        let model = StubClassifier { label: 1 };
        let err = run_prediction("test", &model, Some(Json(Value::Null))).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn well_formed_request_returns_single_prediction_field() {
        let model = StubClassifier { label: 1 };
        let Json(body) = run_prediction(
            "test",
            &model,
            Some(Json(json!({"features": [0.5, 1.0, 3.0]}))),
        )
        .unwrap();

        assert_eq!(body.prediction, 1);

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
    }

    #[test]
    fn non_array_features_is_an_internal_error() {
        let model = StubClassifier { label: 0 };
        let err = run_prediction("test", &model, Some(Json(json!({"features": "abc"}))))
            .unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[test]
    fn non_numeric_feature_value_is_an_internal_error() {
        let model = StubClassifier { label: 0 };
        let err = run_prediction(
            "test",
            &model,
            Some(Json(json!({"features": [1.0, "x", 3.0]}))),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[test]
    fn inference_failure_surfaces_as_inference_error() {
        let model = StubClassifier { label: 0 };
        let err = run_prediction("test", &model, Some(Json(json!({"features": []}))))
            .unwrap_err();
        assert!(matches!(err, AppError::InferenceError(_)));
    }
}
