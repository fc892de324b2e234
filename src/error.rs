#![allow(missing_docs)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatcherError>;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("Invalid catalog JSON: {0}")]
    InvalidCatalog(#[from] serde_json::Error),

    #[error("Catalog has no usable entries: {0}")]
    EmptyCatalog(String),
}
