//! Errors that can reach the caller.
//!
//! Per-source fetch failures never appear here; they are contained inside the
//! fetchers (see [`crate::client::FetchError`]).

use std::path::PathBuf;

/// Why a search request produced no bundle.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was missing or blank. Reported before any fetch starts.
    #[error("Query parameter required")]
    EmptyQuery,

    /// A spawned source task was cancelled before finishing.
    #[error("source task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Why the YAML configuration file could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_message() {
        assert_eq!(SearchError::EmptyQuery.to_string(), "Query parameter required");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Read {
            path: PathBuf::from("/nope.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nope.yaml"));
        assert!(err.to_string().contains("missing"));
    }
}
