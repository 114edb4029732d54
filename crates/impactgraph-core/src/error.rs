//! Error types for Impactgraph

use thiserror::Error;

/// Result type alias using Impactgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Impactgraph error types with helpful messages and suggestions
///
/// Setup paths (opening the database, migrations, config files) use
/// `anyhow` instead; these are the failures of graph operations.
#[derive(Error, Debug)]
pub enum Error {
    // Storage errors (E400-E499)
    #[error("Storage failure: {0}")]
    StorageFailure(#[from] sqlx::Error),

    #[error("Metadata serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageFailure(_) => "E400",
            Self::Serialization(_) => "E401",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::StorageFailure(_) => {
                Some("Check that the graph database file is readable and not corrupted".to_string())
            }
            Self::Serialization(_) => {
                Some("Node and edge metadata must be valid JSON".to_string())
            }
        }
    }

    /// Whether the underlying store failed to complete a read or write
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::StorageFailure(_))
    }
}
