//! Error types shared by the search engine and its collaborators.

use crate::models::{ArticleId, Level};

/// A page could not be retrieved. Fatal to the whole search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The transport could not reach the resource (DNS, TLS, timeout, reset).
    #[error("Cannot connect to the specified URL {url}: {message}")]
    Connection { url: String, message: String },

    /// The server answered, but not with a success status.
    #[error("Cannot connect to the specified URL {url}: HTTP {status}")]
    Status { url: String, status: u16 },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Connection { url, .. } | FetchError::Status { url, .. } => url,
        }
    }
}

/// The level store is missing an entry the orchestrator guaranteed to exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("level store has no entry for '{id}' at level {level}")]
pub struct ReconstructionError {
    pub level: Level,
    pub id: ArticleId,
}

/// Everything that can abort a running search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("path reconstruction failed: {0}")]
    Reconstruction(#[from] ReconstructionError),

    /// A worker task panicked or was cancelled before reporting back.
    #[error("worker task did not complete: {0}")]
    Worker(String),
}
