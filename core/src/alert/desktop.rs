use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::{AlertChannel, AlertEvent, ChannelError};

pub const DEFAULT_APP_NAME: &str = "Intelligent Network Automated Monitor";
pub const DEFAULT_DISPLAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Local desktop notification through `notify-send`.
pub struct DesktopChannel {
    program: String,
    app_name: String,
    timeout: Duration,
}

impl Default for DesktopChannel {
    fn default() -> Self {
        Self {
            program: "notify-send".to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            timeout: DEFAULT_DISPLAY_TIMEOUT,
        }
    }
}

impl DesktopChannel {
    pub fn new(app_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            app_name: app_name.into(),
            timeout,
            ..Self::default()
        }
    }

    /// Use another notifier binary accepting `notify-send` arguments.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn args(&self, event: &AlertEvent) -> Vec<String> {
        vec![
            "--app-name".to_string(),
            self.app_name.clone(),
            "--expire-time".to_string(),
            self.timeout.as_millis().to_string(),
            event.title.clone(),
            event.message.clone(),
        ]
    }
}

#[async_trait]
impl AlertChannel for DesktopChannel {
    fn name(&self) -> &str {
        "Desktop"
    }

    async fn deliver(&self, event: &AlertEvent) -> Result<(), ChannelError> {
        let status = Command::new(&self.program)
            .args(self.args(event))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;

        if !status.success() {
            return Err(ChannelError::Notifier(status.code()));
        }
        Ok(())
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
