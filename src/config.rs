use log::debug;

use crate::error::{NotifyError, REQUIRED_CREDENTIALS};
use crate::runtime::Runtime;

pub const DEFAULT_RELEASE_TAG: &str = "Unknown Version";
pub const DEFAULT_RELEASE_NAME: &str = "New Release";

/// Release metadata supplied by the release event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag: String,
    pub name: String,
    /// Release notes, may contain markdown
    pub body: String,
    pub url: String,
}

impl Default for ReleaseInfo {
    fn default() -> Self {
        Self {
            tag: DEFAULT_RELEASE_TAG.to_string(),
            name: DEFAULT_RELEASE_NAME.to_string(),
            body: String::new(),
            url: String::new(),
        }
    }
}

/// Validated forum credentials. Every field is non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything read from the environment, captured once at startup.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub release: ReleaseInfo,
}

impl Config {
    /// Read credentials and release metadata through the runtime.
    ///
    /// Release defaults apply only to unset variables; a variable set to the
    /// empty string keeps its empty value.
    pub fn from_runtime<R: Runtime>(runtime: &R) -> Self {
        let var = |key: &str| runtime.env_var(key).ok();
        let defaults = ReleaseInfo::default();

        let config = Self {
            client_id: var("REDDIT_CLIENT_ID"),
            client_secret: var("REDDIT_CLIENT_SECRET"),
            username: var("REDDIT_USERNAME"),
            password: var("REDDIT_PASSWORD"),
            release: ReleaseInfo {
                tag: var("RELEASE_TAG").unwrap_or(defaults.tag),
                name: var("RELEASE_NAME").unwrap_or(defaults.name),
                body: var("RELEASE_BODY").unwrap_or(defaults.body),
                url: var("RELEASE_URL").unwrap_or(defaults.url),
            },
        };

        debug!(
            "Loaded release {:?} ({:?}), url {:?}",
            config.release.tag, config.release.name, config.release.url
        );
        config
    }

    /// Names of required credential variables that are unset or empty.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let values = [
            &self.client_id,
            &self.client_secret,
            &self.username,
            &self.password,
        ];
        REQUIRED_CREDENTIALS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Returns the credentials if all four are present and non-empty.
    pub fn credentials(&self) -> Result<Credentials, NotifyError> {
        let missing = self.missing_credentials();
        if !missing.is_empty() {
            return Err(NotifyError::Configuration { missing });
        }

        let value = |v: &Option<String>| v.clone().unwrap_or_default();
        Ok(Credentials {
            client_id: value(&self.client_id),
            client_secret: value(&self.client_secret),
            username: value(&self.username),
            password: value(&self.password),
        })
    }
}
