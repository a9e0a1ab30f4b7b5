//! Alert delivery.
//!
//! Every [`AlertEvent`] is handed to each configured [`AlertChannel`]. Channels
//! are independent: one failing never stops the others from being attempted,
//! and failures are logged rather than returned to the monitor.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

mod desktop;
mod pushbullet;

pub use desktop::{DEFAULT_APP_NAME, DEFAULT_DISPLAY_TIMEOUT, DesktopChannel};
pub use pushbullet::PushbulletChannel;

/// A human notification. Dispatched, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertEvent {
    pub title: String,
    pub message: String,
}

impl AlertEvent {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to launch notifier: {0}")]
    Launch(#[from] std::io::Error),

    #[error("notifier exited with status {0:?}")]
    Notifier(Option<i32>),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("push service rejected the alert with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait AlertChannel: Send + Sync {
    fn name(&self) -> &str;

    async fn deliver(&self, event: &AlertEvent) -> Result<(), ChannelError>;
}

/// Outcome of dispatching one event across all channels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: Vec<String>,
    pub failed: Vec<String>,
}

#[derive(Default)]
pub struct AlertDispatcher {
    channels: Vec<Box<dyn AlertChannel>>,
}

impl AlertDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel: Box<dyn AlertChannel>) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn add_channel(&mut self, channel: Box<dyn AlertChannel>) {
        self.channels.push(channel);
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Attempts delivery on every channel, in registration order.
    pub async fn dispatch(&self, event: &AlertEvent) -> DispatchReport {
        let mut report: DispatchReport = DispatchReport::default();

        for channel in &self.channels {
            match channel.deliver(event).await {
                Ok(()) => {
                    info!("{} alert sent.", channel.name());
                    report.delivered.push(channel.name().to_string());
                }
                Err(e) => {
                    error!("Failed to send {} alert: {e}", channel.name());
                    report.failed.push(channel.name().to_string());
                }
            }
        }

        report
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
