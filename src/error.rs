//! Error taxonomy for an announcement run.
//!
//! Every failure is terminal for the invocation; the variant decides only
//! which message is printed.

use std::fmt;

/// Environment variables that must hold non-empty credentials.
pub const REQUIRED_CREDENTIALS: [&str; 4] = [
    "REDDIT_CLIENT_ID",
    "REDDIT_CLIENT_SECRET",
    "REDDIT_USERNAME",
    "REDDIT_PASSWORD",
];

/// Failures reported by the forum service itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Bad client credentials or bad username/password (HTTP 401, `invalid_grant`)
    AuthenticationFailed(String),
    /// Rate limit hit (HTTP 429 or a `RATELIMIT` submission error)
    RateLimitExceeded(String),
    /// Account or app not allowed to perform the request (HTTP 403)
    Forbidden(String),
    /// Request refused on validation or policy grounds
    Rejected(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::AuthenticationFailed(msg) => {
                write!(
                    f,
                    "Authentication failed: {}. Check the REDDIT_* credentials.",
                    msg
                )
            }
            ServiceError::RateLimitExceeded(msg) => {
                write!(f, "Rate limit exceeded: {}", msg)
            }
            ServiceError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}", msg)
            }
            ServiceError::Rejected(msg) => {
                write!(f, "Submission rejected: {}", msg)
            }
        }
    }
}

impl std::error::Error for ServiceError {}

/// Outcome of a failed announcement.
#[derive(Debug)]
pub enum NotifyError {
    /// Required credentials are missing; nothing was sent.
    Configuration { missing: Vec<&'static str> },
    /// The forum service refused the request.
    Service(ServiceError),
    /// Anything else: transport failures, server errors, malformed responses.
    Unexpected(anyhow::Error),
}

impl NotifyError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::Configuration { missing } => {
                write!(
                    f,
                    "Missing required Reddit API credentials: {}",
                    missing.join(", ")
                )
            }
            NotifyError::Service(e) => write!(f, "{}", e),
            NotifyError::Unexpected(e) => write!(f, "{:#}", e),
        }
    }
}

impl std::error::Error for NotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotifyError::Service(e) => Some(e),
            NotifyError::Unexpected(e) => Some(&**e),
            NotifyError::Configuration { .. } => None,
        }
    }
}

impl From<ServiceError> for NotifyError {
    fn from(e: ServiceError) -> Self {
        NotifyError::Service(e)
    }
}

/// Recovers a typed [`ServiceError`] carried inside an `anyhow::Error`;
/// everything else is unexpected.
impl From<anyhow::Error> for NotifyError {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<ServiceError>() {
            Ok(service) => NotifyError::Service(service),
            Err(other) => NotifyError::Unexpected(other),
        }
    }
}
