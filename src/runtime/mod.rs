//! Runtime abstraction for process-level state.
//!
//! Everything the announcer reads from its surroundings goes through the
//! [`Runtime`] trait so the configuration layer can be exercised with a mock.
//!
//! # Structure
//!
//! - `env` - Environment variable access

mod env;

use std::env as std_env;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }
}
