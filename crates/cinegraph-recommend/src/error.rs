//! Error types for the cinegraph-recommend crate.

use thiserror::Error;

use cinegraph_graph::GraphError;

/// Failures reported by a `MovieStore` implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store rejected query: {0}")]
    Query(String),
}

impl From<GraphError> for StoreError {
    fn from(e: GraphError) -> Self {
        if e.is_unavailable() {
            Self::Unavailable(e.to_string())
        } else {
            Self::Query(e.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Invalid movie catalog: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for RecommendError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
            StoreError::Query(msg) => Self::Query(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
