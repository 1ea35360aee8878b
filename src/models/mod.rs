pub mod grid;
pub mod quote;

pub use grid::{BoggleSize, Grid, GridError};
pub use quote::{Quote, QuoteCategory, QuoteRow};
