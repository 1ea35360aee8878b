pub mod games;
pub mod health;
pub mod message;
pub mod quotes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Acknowledgement body shared by every board endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check))
        .route("/message", post(message::post_message))
        .route("/games/boggle", post(games::start_boggle))
        .route("/sfw_quote", get(quotes::sfw_quote))
        .route("/nsfw_quote", get(quotes::nsfw_quote))
}
