//! Chart figure handlers
//!
//! One endpoint per chart region; each recomputes its aggregate from the
//! shared dataset on every request.

use axum::{extract::State, Json};

use crate::charts::{aggregate, Figure};
use crate::AppState;

pub async fn fraud_trend(State(state): State<AppState>) -> Json<Figure> {
    Json(aggregate::fraud_trend(&state.dataset))
}

pub async fn fraud_map(State(state): State<AppState>) -> Json<Figure> {
    Json(aggregate::fraud_map(&state.dataset))
}

pub async fn fraud_by_device(State(state): State<AppState>) -> Json<Figure> {
    Json(aggregate::fraud_by_device(&state.dataset))
}

pub async fn fraud_by_source(State(state): State<AppState>) -> Json<Figure> {
    Json(aggregate::fraud_by_source(&state.dataset))
}

pub async fn fraud_by_browser(State(state): State<AppState>) -> Json<Figure> {
    Json(aggregate::fraud_by_browser(&state.dataset))
}
