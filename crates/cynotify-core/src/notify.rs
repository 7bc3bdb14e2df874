//! Slack delivery.
//!
//! Posts the rendered notification via the Slack Web API
//! (`chat.postMessage`). Every run goes to the primary channel; alerting
//! runs additionally go to the failures channel.

use crate::config::Config;
use crate::error::NotifyError;
use crate::format::Notification;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Slack Web API client.
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    post_message_url: String,
}

/// `chat.postMessage` request body.
#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

/// Slack's response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
}

impl SlackClient {
    /// Create a new client for the given bot token.
    pub fn new(token: &str) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cynotify/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        SlackClient {
            http,
            token: token.to_string(),
            post_message_url: POST_MESSAGE_URL.to_string(),
        }
    }

    /// Point the client at a different API endpoint.
    pub fn with_post_message_url(mut self, url: &str) -> Self {
        self.post_message_url = url.to_string();
        self
    }

    /// Post a message to a single channel.
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<()> {
        let response = self
            .http
            .post(&self.post_message_url)
            .bearer_auth(&self.token)
            .json(&PostMessageRequest { channel, text })
            .send()
            .await?;

        let envelope: ApiResponse = response.json().await?;
        if envelope.ok {
            debug!("Delivered message to {}", channel);
            Ok(())
        } else {
            Err(NotifyError::Api {
                channel: channel.to_string(),
                reason: envelope
                    .error
                    .unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }
}

/// Outcome of a delivery pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryReport {
    /// Channels the message reached.
    pub delivered: u32,

    /// Channels the message could not be delivered to.
    pub failed: u32,
}

/// Channels a notification is routed to.
pub fn target_channels<'a>(alert: bool, config: &'a Config) -> Vec<&'a str> {
    let mut channels = vec![config.channel.as_str()];
    if alert {
        channels.push(config.failures_channel.as_str());
    }
    channels
}

/// Deliver a notification to its target channels.
///
/// The sends run concurrently and are all awaited before return. A failed
/// send is logged and counted; it never aborts the other send and never
/// propagates to the caller.
pub async fn deliver(
    client: &SlackClient,
    notification: &Notification,
    config: &Config,
) -> DeliveryReport {
    let sends = target_channels(notification.alert, config)
        .into_iter()
        .map(|channel| async move {
            (channel, client.post_message(channel, &notification.text).await)
        });

    let mut report = DeliveryReport::default();
    for (channel, outcome) in futures::future::join_all(sends).await {
        match outcome {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                warn!("Failed to deliver to {}: {}", channel, err);
                report.failed += 1;
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_channels_success_routes_to_primary_only() {
        let config = Config::new("42", "ci-results", "ci-failures");
        assert_eq!(target_channels(false, &config), vec!["ci-results"]);
    }

    #[test]
    fn test_target_channels_alert_routes_to_both() {
        let config = Config::new("42", "ci-results", "ci-failures");
        assert_eq!(
            target_channels(true, &config),
            vec!["ci-results", "ci-failures"]
        );
    }

    #[test]
    fn test_post_message_request_shape() {
        let request = PostMessageRequest {
            channel: "ci-results",
            text: "hello",
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["channel"], "ci-results");
        assert_eq!(json["text"], "hello");
    }

    #[test]
    fn test_api_response_error_envelope() {
        let envelope: ApiResponse =
            serde_json::from_str(r#"{"ok":false,"error":"channel_not_found"}"#)
                .expect("deserialize");
        assert!(!envelope.ok);
        assert_eq!(envelope.error.as_deref(), Some("channel_not_found"));
    }

    #[test]
    fn test_api_response_ok_envelope_without_error() {
        let envelope: ApiResponse =
            serde_json::from_str(r#"{"ok":true,"channel":"C012345"}"#).expect("deserialize");
        assert!(envelope.ok);
        assert!(envelope.error.is_none());
    }

    // Port 9 (discard) has no listener; connects fail immediately.
    fn unreachable_client() -> SlackClient {
        SlackClient::new("xoxb-test").with_post_message_url("http://127.0.0.1:9/chat.postMessage")
    }

    #[tokio::test]
    async fn test_deliver_counts_failed_sends() {
        let config = Config::new("42", "ci-results", "ci-failures");
        let notification = Notification {
            text: "results".to_string(),
            alert: true,
        };

        let report = deliver(&unreachable_client(), &notification, &config).await;
        assert_eq!(report.delivered, 0);
        assert_eq!(report.failed, 2);
    }

    #[tokio::test]
    async fn test_deliver_without_alert_attempts_one_send() {
        let config = Config::new("42", "ci-results", "ci-failures");
        let notification = Notification {
            text: "results".to_string(),
            alert: false,
        };

        let report = deliver(&unreachable_client(), &notification, &config).await;
        assert_eq!(report.delivered, 0);
        assert_eq!(report.failed, 1);
    }
}
