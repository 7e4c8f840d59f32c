//! Remote call error types.

/// Errors that can occur when invoking a remote function.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configured token cannot be sent as a header value
    #[error("invalid bearer token: {message}")]
    InvalidToken { message: String },

    /// Authentication failed
    #[error("unauthorized: check GATHER_FUNCTIONS_TOKEN")]
    Unauthorized,

    /// Function returned an error status
    #[error("function {function} failed with status {status}: {message}")]
    Api {
        function: String,
        status: u16,
        message: String,
    },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
