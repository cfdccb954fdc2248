//! Reddit implementation of the forum traits.
//!
//! Authentication uses the OAuth2 password grant for script apps; posting
//! goes through `/api/submit` with the resulting bearer token.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, Url};

use crate::config::Credentials;
use crate::error::{NotifyError, ServiceError};
use crate::http::{Auth, HttpClient, mask_secret};

use super::{Forum, Session, Submission};

pub const DEFAULT_AUTH_URL: &str = "https://www.reddit.com";
pub const DEFAULT_API_URL: &str = "https://oauth.reddit.com";

/// Reddit API response types (internal).
mod api {
    use serde::Deserialize;
    use serde_json::Value;

    /// Token endpoint reply. Bad user credentials come back as a 200 with
    /// `error` set instead of a token.
    #[derive(Deserialize, Debug)]
    pub struct Token {
        pub access_token: Option<String>,
        pub error: Option<Value>,
    }

    #[derive(Deserialize, Debug)]
    pub struct SubmitResponse {
        pub json: SubmitJson,
    }

    #[derive(Deserialize, Debug)]
    pub struct SubmitJson {
        /// Each entry is `[code, message, field]`.
        #[serde(default)]
        pub errors: Vec<Vec<Value>>,
        pub data: Option<SubmitData>,
    }

    #[derive(Deserialize, Debug)]
    pub struct SubmitData {
        pub id: Option<String>,
        pub name: Option<String>,
        pub url: Option<String>,
    }
}

/// Reddit forum entry point.
pub struct RedditForum {
    auth_url: String,
    api_url: String,
    timeout: Duration,
}

impl RedditForum {
    pub fn new(auth_url: &str, api_url: &str, timeout: Duration) -> Self {
        Self {
            auth_url: auth_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn build_client(&self, user_agent: &str) -> anyhow::Result<HttpClient> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpClient::new(client))
    }
}

impl Default for RedditForum {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_URL, DEFAULT_API_URL, Duration::from_secs(30))
    }
}

#[async_trait]
impl Forum for RedditForum {
    #[tracing::instrument(skip(self, credentials))]
    async fn authenticate(
        &self,
        credentials: &Credentials,
        user_agent: &str,
    ) -> Result<Box<dyn Session>, NotifyError> {
        let http_client = self.build_client(user_agent)?;
        let url = format!("{}/api/v1/access_token", self.auth_url);

        debug!("Requesting access token for u/{}...", credentials.username);

        let token: api::Token = http_client
            .post_form_json(
                &url,
                Auth::Basic {
                    username: &credentials.client_id,
                    password: &credentials.client_secret,
                },
                &[
                    ("grant_type", "password"),
                    ("username", &credentials.username),
                    ("password", &credentials.password),
                ],
            )
            .await
            .context("Requesting access token")?;

        let access_token = match (token.access_token, token.error) {
            (Some(access_token), None) => access_token,
            (_, Some(error)) => {
                let reason = error
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                return Err(ServiceError::AuthenticationFailed(reason).into());
            }
            (None, None) => {
                return Err(NotifyError::Unexpected(anyhow::anyhow!(
                    "Token response contained neither a token nor an error"
                )));
            }
        };

        debug!("Received access token {}", mask_secret(&access_token));
        info!("Authenticated as u/{}", credentials.username);

        Ok(Box::new(RedditSession {
            http_client,
            api_url: self.api_url.clone(),
            access_token,
        }))
    }
}

/// Session holding a bearer token.
pub struct RedditSession {
    http_client: HttpClient,
    api_url: String,
    access_token: String,
}

#[async_trait]
impl Session for RedditSession {
    #[tracing::instrument(skip(self, body))]
    async fn submit(
        &self,
        channel: &str,
        title: &str,
        body: &str,
    ) -> Result<Submission, NotifyError> {
        let url = format!("{}/api/submit", self.api_url);

        debug!("Submitting {} byte post to r/{}...", body.len(), channel);

        let response: api::SubmitResponse = self
            .http_client
            .post_form_json(
                &url,
                Auth::Bearer(&self.access_token),
                &[
                    ("sr", channel),
                    ("kind", "self"),
                    ("title", title),
                    ("text", body),
                    ("api_type", "json"),
                    ("resubmit", "true"),
                    ("sendreplies", "true"),
                ],
            )
            .await
            .context("Submitting post")?;

        let submission = parse_submission(response.json, channel)?;
        info!("Created post {} in r/{}", submission.id, channel);
        Ok(submission)
    }
}

fn parse_submission(json: api::SubmitJson, channel: &str) -> Result<Submission, NotifyError> {
    if !json.errors.is_empty() {
        return Err(submit_error(&json.errors).into());
    }

    let data = json
        .data
        .ok_or_else(|| anyhow::anyhow!("Submit response is missing post data"))?;

    let id = data
        .id
        .or_else(|| {
            data.name
                .as_deref()
                .map(|name| name.trim_start_matches("t3_").to_string())
        })
        .ok_or_else(|| anyhow::anyhow!("Submit response is missing the post id"))?;

    let permalink = match data.url.as_deref().map(Url::parse) {
        Some(Ok(parsed)) => parsed.path().to_string(),
        _ => format!("/r/{}/comments/{}/", channel, id),
    };

    Ok(Submission { id, permalink })
}

fn submit_error(errors: &[Vec<serde_json::Value>]) -> ServiceError {
    let field = |entry: &[serde_json::Value], i: usize| {
        entry
            .get(i)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    if let Some(entry) = errors.iter().find(|&e| field(e, 0) == "RATELIMIT") {
        return ServiceError::RateLimitExceeded(field(entry, 1));
    }

    let messages: Vec<String> = errors
        .iter()
        .map(|e| format!("{}: {}", field(e, 0), field(e, 1)))
        .collect();
    ServiceError::Rejected(messages.join("; "))
}
