use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use release_announcer::config::Config;
use release_announcer::forum::{DEFAULT_API_URL, DEFAULT_AUTH_URL, DEFAULT_CHANNEL, RedditForum};
use release_announcer::notifier::Notifier;

/// release-announcer - Post release announcements to Reddit
///
/// Reads credentials from REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET,
/// REDDIT_USERNAME and REDDIT_PASSWORD, and the release from RELEASE_TAG,
/// RELEASE_NAME, RELEASE_BODY and RELEASE_URL.
///
/// Examples:
///   release-announcer                      # Announce in r/TodayRSS
///   release-announcer --dry-run            # Print the post without sending it
#[derive(Parser, Debug)]
#[command(author, version = env!("ANNOUNCER_VERSION"), about)]
struct Cli {
    /// Subreddit to post in
    #[arg(
        long,
        env = "ANNOUNCER_SUBREDDIT",
        value_name = "NAME",
        default_value = DEFAULT_CHANNEL
    )]
    subreddit: String,

    /// OAuth token host
    #[arg(
        long = "auth-url",
        env = "ANNOUNCER_AUTH_URL",
        value_name = "URL",
        default_value = DEFAULT_AUTH_URL
    )]
    auth_url: String,

    /// Reddit API host
    #[arg(
        long = "api-url",
        env = "ANNOUNCER_API_URL",
        value_name = "URL",
        default_value = DEFAULT_API_URL
    )]
    api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "ANNOUNCER_TIMEOUT", value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// Validate credentials and print the post without submitting it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = release_announcer::runtime::RealRuntime;

    let config = Config::from_runtime(&runtime);
    let forum = RedditForum::new(
        &cli.auth_url,
        &cli.api_url,
        Duration::from_secs(cli.timeout),
    );
    let notifier = Notifier::new(forum, &cli.subreddit);

    let code = if cli.dry_run {
        notifier.dry_run(&config)
    } else {
        notifier.run(&config).await
    };
    ExitCode::from(code)
}
