use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    board::{BoardContent, Phase},
    error::AppError,
    game::GridGenerator,
    routes::MessageResponse,
    AppState, BOGGLE_REVEAL_DELAY,
};

#[derive(Debug, Deserialize)]
pub struct BoggleRequest {
    pub size: i64,
}

/// Start a Boggle round: the start grid goes out now, the end grid after
/// the round timer. Returns as soon as the start grid is on the board.
pub async fn start_boggle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BoggleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidArgument(e.body_text()))?;

    let (start, end) = GridGenerator::generate(request.size).map_err(|e| {
        tracing::warn!("Rejected Boggle request: {}", e);
        AppError::from(e)
    })?;
    let size = start.size();

    state
        .scheduler
        .schedule(
            BoardContent::Grid {
                grid: start,
                phase: Phase::Start,
            },
            BoardContent::Grid {
                grid: end,
                phase: Phase::End,
            },
            BOGGLE_REVEAL_DELAY,
        )
        .await
        .map_err(|e| {
            tracing::error!("Vestaboard error initiating Boggle {} game: {}", size, e);
            AppError::from(e)
        })?;

    tracing::info!("Boggle {} start grid sent", size);

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(format!("Boggle {} game queued.", size))),
    ))
}
