use reqwest::StatusCode;
use thiserror::Error;

use crate::catalog::Book;

/// The text service could not be reached or answered with something unusable.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("request to text service failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("text service returned status {0}")]
    Status(StatusCode),

    #[error("malformed response from text service: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("text service error: {0}")]
    Service(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("verse count mismatch: {original} Hebrew lines but {translated} English lines")]
    DataShape { original: usize, translated: usize },

    #[error("{book} has {count} chapters; chapter {chapter} is out of range")]
    ChapterOutOfRange { book: Book, chapter: u32, count: u32 },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Retrieval(RetrievalError::Network(e))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Retrieval(RetrievalError::Decode(e))
    }
}
