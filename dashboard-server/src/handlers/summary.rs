//! Summary handler

use axum::{extract::State, Json};

use crate::charts::{aggregate, Summary};
use crate::AppState;

/// Summary box values as JSON
pub async fn get(State(state): State<AppState>) -> Json<Summary> {
    Json(aggregate::summary(&state.dataset))
}
