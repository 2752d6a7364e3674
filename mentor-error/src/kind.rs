//! Error kinds for mentor operations

use std::fmt;

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to decide how to report or handle a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The HTTP client could not be built from the provider configuration
    ConfigInvalid,

    // =========================================================================
    // Credential errors
    // =========================================================================
    /// A required API credential is not configured
    CredentialMissing,

    /// The remote API rejected the credential
    AuthenticationFailed,

    // =========================================================================
    // Transport errors
    // =========================================================================
    /// Connection or transport failure
    NetworkFailed,

    /// The remote call did not finish within its timeout
    Timeout,

    // =========================================================================
    // Remote API errors
    // =========================================================================
    /// The remote API answered with a non-success status
    ApiFailed,

    /// Rate limit exceeded
    RateLimited,

    /// The response body did not have the expected shape
    ResponseMalformed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ConfigInvalid => "ConfigInvalid",

            ErrorKind::CredentialMissing => "CredentialMissing",
            ErrorKind::AuthenticationFailed => "AuthenticationFailed",

            ErrorKind::NetworkFailed => "NetworkFailed",
            ErrorKind::Timeout => "Timeout",

            ErrorKind::ApiFailed => "ApiFailed",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::ResponseMalformed => "ResponseMalformed",
        }
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::NetworkFailed | ErrorKind::Timeout | ErrorKind::RateLimited
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
