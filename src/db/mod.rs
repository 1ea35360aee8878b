use std::time::Duration;

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};

use crate::config::DatabaseConfig;

pub mod queries;

pub use queries::{MySqlQuoteStore, QuoteError, QuoteStore};

/// Build the quote pool without connecting; the first query opens a
/// connection, so an unreachable database fails requests rather than startup.
pub fn create_pool(config: &DatabaseConfig) -> MySqlPool {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name);

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options)
}
