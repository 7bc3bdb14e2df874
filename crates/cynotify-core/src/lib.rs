//! cynotify-core - run-output parsing and Slack delivery
//!
//! Implements the three-stage notification pipeline:
//! - [`extract`]: turn the captured stdout of a test run into a [`RunSummary`]
//! - [`format`]: turn the summary into a [`Notification`]
//! - [`notify`]: deliver the notification to one or two Slack channels

pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod notify;
pub mod summary;
pub mod telemetry;

// Re-export key types
pub use config::Config;
pub use error::NotifyError;
pub use extract::{parse_run_file, parse_run_output};
pub use format::{render, Notification};
pub use notify::{deliver, target_channels, DeliveryReport, SlackClient};
pub use summary::{Category, RunSummary};
pub use telemetry::init_tracing;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, NotifyError>;
