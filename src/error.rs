use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{
    board::{RenderError, VendorError},
    db::QuoteError,
    models::GridError,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("No message content provided.")]
    EmptyMessage,

    #[error("Invalid characters in message: {0:?} is not supported by the board")]
    InvalidCharacter(char),

    #[error("{0}")]
    Vendor(#[from] VendorError),

    #[error("Quotes are disabled")]
    FeatureDisabled,

    #[error("Quote not found")]
    NotFound,

    #[error("Quote database unavailable")]
    Database,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyMessage => StatusCode::BAD_REQUEST,
            AppError::InvalidCharacter(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Vendor(e) if e.is_auth() => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Vendor(_) => StatusCode::BAD_GATEWAY,
            AppError::FeatureDisabled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::InvalidCharacter(ch) => AppError::InvalidCharacter(ch),
            RenderError::Vendor(e) => AppError::Vendor(e),
        }
    }
}

impl From<GridError> for AppError {
    fn from(err: GridError) -> Self {
        AppError::InvalidArgument(err.to_string())
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::NotFound(_) => AppError::NotFound,
            QuoteError::Database(e) => {
                tracing::error!("Database error fetching quote: {}", e);
                AppError::Database
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
