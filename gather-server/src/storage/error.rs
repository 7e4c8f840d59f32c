//! Storage error types.

use crate::domain::DomainError;

use super::StorageKey;

/// Errors that can occur when reading or writing preferences.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Backing file could not be read or written
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing document is not valid JSON
    #[error("storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored value does not have the expected shape
    #[error("stored value for {key} could not be decoded: {message}")]
    Decode { key: StorageKey, message: String },

    /// Value rejected before saving
    #[error("invalid value: {0}")]
    Invalid(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StorageError::Decode {
            key: StorageKey::Category,
            message: "expected a sequence".into(),
        };
        assert_eq!(
            err.to_string(),
            "stored value for @category could not be decoded: expected a sequence"
        );

        let err = StorageError::from(DomainError::NoStations);
        assert_eq!(
            err.to_string(),
            "invalid value: category must contain at least one station"
        );
    }
}
