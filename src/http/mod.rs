//! HTTP client module with service error classification.

mod client;
mod status;

pub use client::{Auth, HttpClient, mask_secret};
pub use status::{check_service_error, classify_error};
