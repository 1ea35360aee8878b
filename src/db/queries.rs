use async_trait::async_trait;
use sqlx::MySqlPool;
use thiserror::Error;

use crate::models::{Quote, QuoteCategory, QuoteRow};

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("No quotes found in {0}")]
    NotFound(&'static str),

    #[error("Quote database unavailable: {0}")]
    Database(#[from] sqlx::Error),
}

/// Source of random quotes
#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn fetch_random(&self, category: QuoteCategory) -> Result<Quote, QuoteError>;
}

pub struct MySqlQuoteStore {
    pool: MySqlPool,
}

impl MySqlQuoteStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn random_quote_query(category: QuoteCategory) -> String {
    format!("SELECT * FROM {} ORDER BY RAND() LIMIT 1", category.table())
}

#[async_trait]
impl QuoteStore for MySqlQuoteStore {
    async fn fetch_random(&self, category: QuoteCategory) -> Result<Quote, QuoteError> {
        let query = random_quote_query(category);
        tracing::debug!("Executing query: {}", query);

        let row = sqlx::query_as::<_, QuoteRow>(&query)
            .fetch_optional(&self.pool)
            .await?;

        quote_from_result(row, category)
    }
}

/// An empty table and a NULL quote column both mean there is nothing to show
fn quote_from_result(row: Option<QuoteRow>, category: QuoteCategory) -> Result<Quote, QuoteError> {
    row.and_then(|row| Quote::from_row(row, category)).ok_or_else(|| {
        tracing::warn!("No quote found in table {}", category.table());
        QuoteError::NotFound(category.table())
    })
}
