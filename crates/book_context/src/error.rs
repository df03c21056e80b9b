//! Reference context loader error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextLoadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0} fetching the reference document")]
    Status(reqwest::StatusCode),
}

pub type Result<T> = std::result::Result<T, ContextLoadError>;
