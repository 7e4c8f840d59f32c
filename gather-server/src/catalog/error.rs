//! Catalog error types.

use std::path::PathBuf;

/// Errors raised while loading the static catalogs.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON for the expected shape
    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The same route name appears twice in one operator table
    #[error("duplicate route {route:?} in operator table {operator:?}")]
    DuplicateRoute { operator: String, route: String },

    /// A route descriptor failed validation
    #[error("invalid descriptor for route {route:?} in operator table {operator:?}: {message}")]
    InvalidDescriptor {
        operator: String,
        route: String,
        message: String,
    },
}

/// Errors raised by station search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The query is not a valid match pattern
    #[error("invalid search pattern {pattern:?}: {message}")]
    InvalidQueryPattern { pattern: String, message: String },
}
