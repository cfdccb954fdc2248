//! Maps HTTP failure statuses onto [`ServiceError`].

use reqwest::StatusCode;

use crate::error::ServiceError;

/// Classifies an error from `error_for_status()`.
/// Returns `Some` for client errors the service is responsible for,
/// `None` for server errors and transport failures.
pub fn classify_error(error: &reqwest::Error) -> Option<ServiceError> {
    let status = error.status()?;
    match status {
        StatusCode::UNAUTHORIZED => Some(ServiceError::AuthenticationFailed(
            "Invalid client credentials or access token".to_string(),
        )),
        StatusCode::FORBIDDEN => Some(ServiceError::Forbidden(
            "The account is not allowed to perform this request".to_string(),
        )),
        StatusCode::TOO_MANY_REQUESTS => Some(ServiceError::RateLimitExceeded(
            "Too many requests".to_string(),
        )),
        s if s.is_client_error() => Some(ServiceError::Rejected(format!(
            "HTTP {} error",
            s.as_u16()
        ))),
        _ => None,
    }
}

/// Wraps an error from `error_for_status()` so a [`ServiceError`] can be
/// recovered by downcast; unclassified errors pass through untouched.
pub fn check_service_error(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Some(service) => anyhow::Error::from(service),
        None => anyhow::Error::from(error),
    }
}
