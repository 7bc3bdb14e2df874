//! Error types for cynotify-core

use thiserror::Error;

/// Errors that can occur while parsing run output or delivering a message
#[derive(Error, Debug)]
pub enum NotifyError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The run executed tests but its output carries no elapsed-time token
    #[error("run output has no elapsed-time token")]
    DurationMissing,

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Slack accepted the request but rejected the message
    #[error("Slack API rejected message to {channel}: {reason}")]
    Api { channel: String, reason: String },
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Http(err.to_string())
    }
}
