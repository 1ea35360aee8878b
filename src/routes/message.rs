use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::{board::BoardContent, error::AppError, routes::MessageResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// Put a text message on the board
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::InvalidArgument(e.body_text()))?;

    if payload.message.is_empty() {
        return Err(AppError::EmptyMessage);
    }

    state
        .renderer
        .render(&BoardContent::Text(payload.message))
        .await
        .map_err(|e| {
            tracing::error!("Error posting message: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(MessageResponse::new("Message sent successfully")))
}
