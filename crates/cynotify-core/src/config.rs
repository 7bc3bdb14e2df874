//! Notifier configuration.
//!
//! Read once at startup from the CI environment and passed by reference
//! into the formatter and the notifier.

use serde::{Deserialize, Serialize};

const DEFAULT_RUN_URL_BASE: &str = "https://github.com/your-project/actions/runs/";

/// Notifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// CI run identifier (e.g. the GitHub Actions run id)
    pub run_id: String,
    /// Base URL the run id is appended to when building the run link
    pub run_url_base: String,
    /// Slack subteam id mentioned on failures
    pub group_id: String,
    /// Slack bot token (required only when actually delivering)
    pub bot_token: Option<String>,
    /// Channel that receives every run summary
    pub channel: String,
    /// Channel that additionally receives failing runs
    pub failures_channel: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            run_id: std::env::var("GITHUB_RUN_ID").unwrap_or_else(|_| "local".to_string()),
            run_url_base: std::env::var("GITHUB_RUN_URL_BASE")
                .unwrap_or_else(|_| DEFAULT_RUN_URL_BASE.to_string()),
            group_id: std::env::var("SLACK_QA_GROUP_ID").unwrap_or_default(),
            bot_token: std::env::var("SLACK_BOT_TOKEN").ok(),
            channel: std::env::var("SLACK_CHANNEL_NAME_ALL")
                .unwrap_or_else(|_| "ci-results".to_string()),
            failures_channel: std::env::var("SLACK_CHANNEL_NAME_FAILS")
                .unwrap_or_else(|_| "ci-failures".to_string()),
        }
    }
}

impl Config {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Config for a specific run and channel pair, without touching the
    /// process environment.
    pub fn new(run_id: &str, channel: &str, failures_channel: &str) -> Self {
        Config {
            run_id: run_id.to_string(),
            run_url_base: DEFAULT_RUN_URL_BASE.to_string(),
            group_id: String::new(),
            bot_token: None,
            channel: channel.to_string(),
            failures_channel: failures_channel.to_string(),
        }
    }

    /// Set the bot token
    pub fn with_token(mut self, token: &str) -> Self {
        self.bot_token = Some(token.to_string());
        self
    }

    /// Set the Slack subteam mentioned on failures
    pub fn with_group(mut self, group_id: &str) -> Self {
        self.group_id = group_id.to_string();
        self
    }

    /// Full URL of the CI run this notification refers to.
    pub fn run_url(&self) -> String {
        format!("{}{}", self.run_url_base, self.run_id)
    }
}
