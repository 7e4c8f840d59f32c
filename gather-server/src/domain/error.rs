//! Domain error types.
//!
//! These errors represent validation failures on user-authored data
//! (categories and station selections). They are distinct from I/O errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Category title is empty
    #[error("category title is required")]
    MissingTitle,

    /// Category title is longer than allowed
    #[error("category title must be at most {max} characters")]
    TitleTooLong { max: usize },

    /// Category icon is more than a single character
    #[error("category icon must be a single character")]
    IconTooLong,

    /// Category has no stations
    #[error("category must contain at least one station")]
    NoStations,

    /// Category or selection holds more stations than allowed
    #[error("at most {max} stations can be selected")]
    SelectionFull { max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            DomainError::MissingTitle.to_string(),
            "category title is required"
        );
        assert_eq!(
            DomainError::TitleTooLong { max: 12 }.to_string(),
            "category title must be at most 12 characters"
        );
        assert_eq!(
            DomainError::IconTooLong.to_string(),
            "category icon must be a single character"
        );
        assert_eq!(
            DomainError::NoStations.to_string(),
            "category must contain at least one station"
        );
        assert_eq!(
            DomainError::SelectionFull { max: 12 }.to_string(),
            "at most 12 stations can be selected"
        );
    }
}
