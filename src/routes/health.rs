use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{routes::MessageResponse, AppState};

/// Home endpoint
pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Hello, World! I am the home automation helper",
    ))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "board-helper-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "quotes_enabled": state.config.quotes.enabled,
        "pending_transmissions": state.scheduler.pending(),
    }))
}
