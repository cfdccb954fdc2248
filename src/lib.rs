pub mod config;
pub mod error;
pub mod forum;
pub mod http;
pub mod notifier;
pub mod post;
pub mod runtime;
