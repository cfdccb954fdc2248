//! Forum service abstraction.
//!
//! The announcer only needs two capabilities from a forum: log in, and
//! create one post in a named channel. Both sit behind traits so the
//! announcement flow can run against mocks.

mod reddit;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::error::NotifyError;

pub use reddit::{DEFAULT_API_URL, DEFAULT_AUTH_URL, RedditForum};

/// Default channel (subreddit) announcements go to.
pub const DEFAULT_CHANNEL: &str = "TodayRSS";

/// Public site the permalink is relative to.
pub const SITE_URL: &str = "https://reddit.com";

/// A post created on the forum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: String,
    /// Site-relative path, e.g. `/r/TodayRSS/comments/abc123/title/`
    pub permalink: String,
}

impl Submission {
    /// Absolute address of the post.
    pub fn url(&self) -> String {
        format!("{}{}", SITE_URL, self.permalink)
    }
}

/// Client identifier sent with every request.
pub fn user_agent(username: &str) -> String {
    format!(
        "GitHub Actions Release Bot for Today RSS Reader by u/{}",
        username
    )
}

/// Entry point of a forum service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Forum: Send + Sync {
    /// Log in and return a session able to post.
    async fn authenticate(
        &self,
        credentials: &Credentials,
        user_agent: &str,
    ) -> Result<Box<dyn Session>, NotifyError>;
}

/// An authenticated forum session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Session: Send + Sync {
    /// Create a text post in `channel`.
    async fn submit(
        &self,
        channel: &str,
        title: &str,
        body: &str,
    ) -> Result<Submission, NotifyError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_embeds_username() {
        assert_eq!(
            user_agent("todayrss_bot"),
            "GitHub Actions Release Bot for Today RSS Reader by u/todayrss_bot"
        );
    }

    #[test]
    fn test_submission_url() {
        let submission = Submission {
            id: "abc123".into(),
            permalink: "/r/TodayRSS/comments/abc123/spring_update/".into(),
        };
        assert_eq!(
            submission.url(),
            "https://reddit.com/r/TodayRSS/comments/abc123/spring_update/"
        );
    }
}
