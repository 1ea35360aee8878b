use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    StatusCode,
};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::{board::layout::BoardCharacters, config::VestaboardConfig};

#[derive(Debug, Clone, Error)]
pub enum VendorError {
    /// Credentials rejected or subscription unavailable
    #[error("Vestaboard authentication error: {0}")]
    Auth(String),

    /// The API answered with a non-success status
    #[error("Vestaboard returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Network failure or timeout
    #[error("Error communicating with Vestaboard: {0}")]
    Transport(String),
}

impl VendorError {
    pub fn is_auth(&self) -> bool {
        matches!(self, VendorError::Auth(_))
    }
}

impl From<reqwest::Error> for VendorError {
    fn from(err: reqwest::Error) -> Self {
        VendorError::Transport(err.to_string())
    }
}

/// Anything that can put content on the physical board
#[async_trait]
pub trait DisplayClient: Send + Sync {
    /// Send free text; the vendor handles wrapping
    async fn send_text(&self, text: &str) -> Result<(), VendorError>;

    /// Send an exact 6x22 character layout
    async fn send_characters(&self, characters: &BoardCharacters) -> Result<(), VendorError>;
}

#[derive(Debug, Deserialize)]
struct SubscriptionList {
    #[serde(default)]
    subscriptions: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
struct Subscription {
    #[serde(rename = "_id")]
    id: Option<String>,
}

/// Vestaboard platform API client
pub struct VestaboardClient {
    http_client: reqwest::Client,
    base_url: String,
    subscription_id: OnceCell<String>,
}

impl VestaboardClient {
    pub fn new(config: &VestaboardConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        let mut api_key = HeaderValue::from_str(&config.api_key)?;
        api_key.set_sensitive(true);
        let mut api_secret = HeaderValue::from_str(&config.api_secret)?;
        api_secret.set_sensitive(true);
        headers.insert("X-Vestaboard-Api-Key", api_key);
        headers.insert("X-Vestaboard-Api-Secret", api_secret);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            subscription_id: OnceCell::new(),
        })
    }

    /// Subscription the board is reachable through. Fetched once; concurrent
    /// first callers wait on the same request.
    async fn subscription_id(&self) -> Result<&str, VendorError> {
        let id = self
            .subscription_id
            .get_or_try_init(|| self.fetch_subscription_id())
            .await?;
        Ok(id.as_str())
    }

    async fn fetch_subscription_id(&self) -> Result<String, VendorError> {
        tracing::info!("Fetching Vestaboard subscription ID");

        let response = self
            .http_client
            .get(format!("{}/subscriptions", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Subscription lookup failed: {} - {}", status, body);
            return Err(status_error(status, body));
        }

        let list = response
            .json::<SubscriptionList>()
            .await
            .map_err(|e| VendorError::Auth(format!("Unreadable subscription list: {}", e)))?;

        let id = list
            .subscriptions
            .into_iter()
            .find_map(|s| s.id)
            .ok_or_else(|| VendorError::Auth("No subscription available for these credentials".into()))?;

        tracing::info!("Cached Vestaboard subscription ID {}", id);
        Ok(id)
    }

    async fn post_message(&self, payload: serde_json::Value) -> Result<(), VendorError> {
        let sub_id = self.subscription_id().await?;
        let response = self
            .http_client
            .post(format!("{}/subscriptions/{}/message", self.base_url, sub_id))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Vestaboard message post failed: {} - {}", status, body);
            return Err(status_error(status, body));
        }

        tracing::debug!("Posted message to subscription {} ({})", sub_id, status);
        Ok(())
    }
}

fn status_error(status: StatusCode, body: String) -> VendorError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            VendorError::Auth(format!("HTTP {}", status.as_u16()))
        }
        _ => VendorError::Status {
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl DisplayClient for VestaboardClient {
    async fn send_text(&self, text: &str) -> Result<(), VendorError> {
        self.post_message(json!({ "text": text })).await
    }

    async fn send_characters(&self, characters: &BoardCharacters) -> Result<(), VendorError> {
        self.post_message(json!({ "characters": characters })).await
    }
}
