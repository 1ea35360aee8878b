use std::sync::Arc;

use thiserror::Error;

use crate::{
    board::{
        charset::first_unsupported,
        client::{DisplayClient, VendorError},
        layout::{compose_grid, Phase},
    },
    models::Grid,
};

/// Something to put on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardContent {
    Text(String),
    Grid { grid: Grid, phase: Phase },
}

impl BoardContent {
    pub fn describe(&self) -> String {
        match self {
            BoardContent::Text(text) => format!("text ({} chars)", text.chars().count()),
            BoardContent::Grid { grid, phase } => format!("{} grid ({:?})", grid.size(), phase),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Message contains unsupported character {0:?}")]
    InvalidCharacter(char),

    #[error(transparent)]
    Vendor(#[from] VendorError),
}

/// Encodes content for the board and hands it to the display client.
/// Cheap to clone; clones share the client.
#[derive(Clone)]
pub struct BoardRenderer {
    client: Arc<dyn DisplayClient>,
}

impl BoardRenderer {
    pub fn new(client: Arc<dyn DisplayClient>) -> Self {
        Self { client }
    }

    pub async fn render(&self, content: &BoardContent) -> Result<(), RenderError> {
        match content {
            BoardContent::Text(text) => {
                if let Some(ch) = first_unsupported(text) {
                    tracing::warn!("Rejecting message with unsupported character {:?}", ch);
                    return Err(RenderError::InvalidCharacter(ch));
                }
                self.client.send_text(text).await?;
            }
            BoardContent::Grid { grid, phase } => {
                let characters = compose_grid(grid, *phase);
                self.client.send_characters(&characters).await?;
            }
        }

        tracing::debug!("Rendered {}", content.describe());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::{sync::mpsc, time::Instant};

    use super::*;
    use crate::board::layout::BoardCharacters;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Sent {
        Text(String),
        Characters(BoardCharacters),
    }

    /// In-memory display that records every transmission with the (tokio)
    /// time it happened. Failures can be queued for characters whose
    /// content matches a predicate.
    pub struct RecordingDisplay {
        sent: Mutex<Vec<(Instant, Sent)>>,
        fail_when: Mutex<Vec<Box<dyn Fn(&Sent) -> Option<VendorError> + Send>>>,
        events: Option<mpsc::UnboundedSender<Sent>>,
    }

    impl RecordingDisplay {
        pub fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail_when: Mutex::new(Vec::new()),
                events: None,
            })
        }

        /// Display that also streams each transmission (including failed
        /// attempts) to the returned receiver
        pub fn with_events() -> (Arc<Self>, mpsc::UnboundedReceiver<Sent>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let display = Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail_when: Mutex::new(Vec::new()),
                events: Some(tx),
            });
            (display, rx)
        }

        pub fn fail_if(&self, rule: impl Fn(&Sent) -> Option<VendorError> + Send + 'static) {
            self.fail_when.lock().unwrap().push(Box::new(rule));
        }

        pub fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().iter().map(|(_, s)| s.clone()).collect()
        }

        pub fn timeline(&self) -> Vec<(Instant, Sent)> {
            self.sent.lock().unwrap().clone()
        }

        fn record(&self, item: Sent) -> Result<(), VendorError> {
            if let Some(tx) = &self.events {
                let _ = tx.send(item.clone());
            }
            let failure = self
                .fail_when
                .lock()
                .unwrap()
                .iter()
                .find_map(|rule| rule(&item));
            if let Some(err) = failure {
                return Err(err);
            }
            self.sent.lock().unwrap().push((Instant::now(), item));
            Ok(())
        }
    }

    #[async_trait]
    impl DisplayClient for RecordingDisplay {
        async fn send_text(&self, text: &str) -> Result<(), VendorError> {
            self.record(Sent::Text(text.to_string()))
        }

        async fn send_characters(&self, characters: &BoardCharacters) -> Result<(), VendorError> {
            self.record(Sent::Characters(characters.clone()))
        }
    }
}
