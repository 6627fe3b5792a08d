//! Error taxonomy for backend calls.
//!
//! Four terminal outcomes: the backend could not be reached at all, the
//! client-side deadline expired, the backend answered with an error status
//! (optionally carrying a structured `detail` message), or the response
//! body failed to decode. Client-side validation failures never become an
//! [`ApiError`]; they stay inside the form that raised them.

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request deadline expired before a response arrived.
    #[error("Request timed out")]
    Timeout,

    /// No response was received (connection refused, DNS failure, ...).
    #[error("Cannot reach the backend: {0}")]
    Network(String),

    /// The backend answered with an error status.
    #[error("Server error ({status})")]
    Server { status: u16, detail: Option<String> },

    /// The response arrived but its body was not what we expected.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The backend's own `detail` message, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// User-facing message: the backend's detail verbatim when present,
    /// otherwise the given fallback.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.detail().unwrap_or(fallback)
    }

    /// HTTP status of a server error, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_surfaced_verbatim() {
        let err = ApiError::Server {
            status: 401,
            detail: Some("Invalid credentials".to_string()),
        };
        assert_eq!(err.message_or("Failed to sign in"), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn missing_detail_falls_back() {
        let err = ApiError::Server {
            status: 500,
            detail: None,
        };
        assert_eq!(err.message_or("Failed to sign in"), "Failed to sign in");
    }

    #[test]
    fn network_and_timeout_use_fallback() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.message_or("Could not load mods"), "Could not load mods");
        assert!(ApiError::Timeout.is_timeout());
    }
}
