use thiserror::Error;

/// Errors raised while talking to the platform API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not authorized. Run 'provadmin login' to sign in.")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("Replay fixture error: {0}")]
    Replay(#[from] std::io::Error),
}

impl ApiError {
    /// Internal errors are failures of the client or the network rather than
    /// a rejection of what the user asked for.
    pub fn is_internal(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Parse(_) | ApiError::Replay(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_classification() {
        assert!(ApiError::Network("timeout".to_string()).is_internal());
        assert!(ApiError::Parse("eof".to_string()).is_internal());
        assert!(!ApiError::Unauthorized.is_internal());
        assert!(!ApiError::NotFound("/tenants/9".to_string()).is_internal());
        assert!(!ApiError::Status { status: 422, message: "bad".to_string() }.is_internal());
    }

    #[test]
    fn test_status_message() {
        let err = ApiError::Status { status: 409, message: "Email already registered".to_string() };
        assert_eq!(err.to_string(), "API error 409: Email already registered");
    }
}
