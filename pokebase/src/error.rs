use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    RequestFailed(Arc<reqwest::Error>),
    #[error("failed to fetch Pokémon: {text} ({status})")]
    Status { status: u16, text: String },
    #[error("invalid response body: {0}")]
    InvalidBody(Arc<serde_json::Error>),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("invalid query: {0:?}")]
    InvalidQuery(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(Arc::new(error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidBody(Arc::new(error))
    }
}
