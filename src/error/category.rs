//! Error category classification.
//!
//! Categories let the UI shell decide how to present a failure without
//! matching on every concrete error variant.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures (connection refused, DNS, timeout, decode).
    /// Retryable by the user.
    Network,

    /// The server answered with a non-success status other than 401.
    /// Retryable by the user.
    Server,

    /// The server rejected the credential. Requires re-authentication.
    Auth,

    /// User input was rejected (e.g. an empty API key).
    User,

    /// Local persistence failed.
    System,
}

impl ErrorCategory {
    /// Returns true if errors in this category can be fixed by retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Auth => "auth",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_categories() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
        assert!(!ErrorCategory::System.is_retryable());
    }

    #[test]
    fn test_display_matches_as_str() {
        for category in [
            ErrorCategory::Network,
            ErrorCategory::Server,
            ErrorCategory::Auth,
            ErrorCategory::User,
            ErrorCategory::System,
        ] {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
