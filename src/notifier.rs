//! Announcement flow: validate, derive, authenticate, submit, report.

use log::{debug, warn};

use crate::config::Config;
use crate::error::{NotifyError, REQUIRED_CREDENTIALS};
use crate::forum::{Forum, Submission, user_agent};
use crate::post::PostContent;

/// A successfully posted announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub content: PostContent,
    pub submission: Submission,
}

pub struct Notifier<F: Forum> {
    forum: F,
    channel: String,
}

impl<F: Forum> Notifier<F> {
    pub fn new(forum: F, channel: &str) -> Self {
        Self {
            forum,
            channel: channel.to_string(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Posts the announcement for `config.release`.
    ///
    /// Credentials are checked before anything is sent; a missing one
    /// returns [`NotifyError::Configuration`] without touching the forum.
    pub async fn announce(&self, config: &Config) -> Result<Announcement, NotifyError> {
        let credentials = config.credentials()?;
        let content = PostContent::from_release(&config.release);

        debug!("Derived post title: {}", content.title);

        let session = self
            .forum
            .authenticate(&credentials, &user_agent(&credentials.username))
            .await?;
        let submission = session
            .submit(&self.channel, &content.title, &content.body)
            .await?;

        Ok(Announcement {
            content,
            submission,
        })
    }

    /// Runs [`announce`](Self::announce) and prints the outcome.
    /// Returns the process exit status.
    pub async fn run(&self, config: &Config) -> u8 {
        match self.announce(config).await {
            Ok(announcement) => {
                println!("✅ Successfully posted to r/{}!", self.channel);
                println!("📝 Post title: {}", announcement.content.title);
                println!("🔗 Post URL: {}", announcement.submission.url());
                0
            }
            Err(e) => {
                report(&e);
                e.exit_code()
            }
        }
    }

    /// Validates credentials and prints the post that would be submitted.
    pub fn dry_run(&self, config: &Config) -> u8 {
        if let Err(e) = config.credentials() {
            report(&e);
            return e.exit_code();
        }

        let content = PostContent::from_release(&config.release);
        println!("📝 Post title: {}", content.title);
        println!("📍 Target: r/{}", self.channel);
        println!("{}", content.body);
        0
    }
}

fn report(error: &NotifyError) {
    match error {
        NotifyError::Configuration { missing } => {
            warn!("Missing credentials: {}", missing.join(", "));
            println!("Error: Missing required Reddit API credentials");
            println!(
                "Please ensure {}, {}, {}, and {} are set",
                REQUIRED_CREDENTIALS[0],
                REQUIRED_CREDENTIALS[1],
                REQUIRED_CREDENTIALS[2],
                REQUIRED_CREDENTIALS[3]
            );
        }
        NotifyError::Service(e) => println!("❌ Reddit API error: {}", e),
        NotifyError::Unexpected(e) => println!("❌ Unexpected error: {:#}", e),
    }
}
