use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{
    board::BoardContent, error::AppError, models::QuoteCategory, routes::MessageResponse, AppState,
};

/// Random safe-for-work quote to the board
pub async fn sfw_quote(State(state): State<Arc<AppState>>) -> Result<Json<MessageResponse>, AppError> {
    send_quote(&state, QuoteCategory::Sfw).await
}

/// Random not-safe-for-work quote to the board
pub async fn nsfw_quote(State(state): State<Arc<AppState>>) -> Result<Json<MessageResponse>, AppError> {
    send_quote(&state, QuoteCategory::Nsfw).await
}

async fn send_quote(state: &AppState, category: QuoteCategory) -> Result<Json<MessageResponse>, AppError> {
    let store = state.quotes.as_ref().ok_or_else(|| {
        tracing::info!("{} quote requested but quotes are disabled", category.label());
        AppError::FeatureDisabled
    })?;

    let quote = store.fetch_random(category).await?;

    state
        .renderer
        .render(&BoardContent::Text(quote.display_text()))
        .await
        .map_err(|e| {
            tracing::error!("Vestaboard error sending {} quote: {}", category.label(), e);
            AppError::from(e)
        })?;

    tracing::info!("Sent random {} quote to board", category.label());
    Ok(Json(MessageResponse::new(format!(
        "Random {} quote queued",
        category.label()
    ))))
}
