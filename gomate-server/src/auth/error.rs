//! Auth client error types.

/// Errors from the auth HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the credentials
    #[error("invalid username or password")]
    InvalidCredentials,

    /// API returned an unexpected error status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {0}")]
    Json(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid username or password"
        );
        assert_eq!(
            AuthError::ApiError {
                status: 503,
                message: "down".into()
            }
            .to_string(),
            "API error 503: down"
        );
    }
}
