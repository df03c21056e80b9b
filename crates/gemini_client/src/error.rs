use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("model returned no text")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, ModelError>;
