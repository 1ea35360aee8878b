mod board;
mod config;
mod db;
mod error;
mod game;
mod models;
mod routes;
mod scheduler;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::Router;
use board::{BoardRenderer, DisplayClient, VestaboardClient};
use config::Config;
use db::{MySqlQuoteStore, QuoteStore};
use scheduler::TransmissionScheduler;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long a Boggle round lasts before the end grid replaces the start grid
pub const BOGGLE_REVEAL_DELAY: Duration = Duration::from_secs(200);

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub renderer: BoardRenderer,
    pub scheduler: TransmissionScheduler,
    /// `None` when the quote feature is switched off
    pub quotes: Option<Arc<dyn QuoteStore>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "board_helper_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting board helper backend...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Vestaboard client, shared by every render
    let client: Arc<dyn DisplayClient> = Arc::new(VestaboardClient::new(&config.vestaboard)?);
    let renderer = BoardRenderer::new(client);
    tracing::info!("Vestaboard client initialized");

    // Quote database, only when enabled
    let quotes = match &config.quotes.database {
        Some(database) => {
            let pool = db::create_pool(database);
            tracing::info!(
                "Quote database configured at {}:{}/{}",
                database.host,
                database.port,
                database.name
            );
            Some(Arc::new(MySqlQuoteStore::new(pool)) as Arc<dyn QuoteStore>)
        }
        None => {
            tracing::info!("Quote feature disabled");
            None
        }
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        renderer: renderer.clone(),
        scheduler: TransmissionScheduler::new(renderer),
        quotes,
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .merge(routes::create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let pending = state.scheduler.pending();
    if pending > 0 {
        tracing::warn!("Shutting down with {} end grid(s) still pending; they will not be sent", pending);
    }
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
