//! Model status handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::model::ModelInfo;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

/// List the loaded models with their inference stats
pub async fn list(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: vec![state.fraud_model.info(), state.credit_card_model.info()],
    })
}
