//! # Monitor Configuration
//!
//! The target list is a plain text file:
//!
//! ```text
//! 4
//! 10.0.0.1
//! example.com
//! ```
//!
//! The first non-empty line is the packet count for the full ping stage.
//! Every following non-empty line is one host, processed in file order.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::target::Target;

pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read target list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("target list is empty")]
    Empty,

    #[error("line {line}: packet count must be a positive integer, got '{value}'")]
    InvalidPacketCount { line: usize, value: String },

    #[error("line {line}: packet count must be greater than zero")]
    ZeroPacketCount { line: usize },

    #[error("target list contains no hosts after the packet count")]
    NoTargets,

    #[error("line {line}: {reason}")]
    InvalidTarget { line: usize, reason: String },
}

/// Parsed contents of a target list file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetList {
    pub packet_count: u32,
    pub targets: Vec<Target>,
}

impl FromStr for TargetList {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (count_line, raw_count) = lines.next().ok_or(ConfigError::Empty)?;
        let packet_count: u32 = parse_packet_count(count_line, raw_count)?;

        let mut targets: Vec<Target> = Vec::new();
        for (line, raw) in lines {
            let target: Target = raw
                .parse()
                .map_err(|reason| ConfigError::InvalidTarget { line, reason })?;
            targets.push(target);
        }

        if targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }

        Ok(TargetList { packet_count, targets })
    }
}

fn parse_packet_count(line: usize, raw: &str) -> Result<u32, ConfigError> {
    let count: u32 = raw
        .parse()
        .map_err(|_| ConfigError::InvalidPacketCount {
            line,
            value: raw.to_string(),
        })?;

    if count == 0 {
        return Err(ConfigError::ZeroPacketCount { line });
    }

    Ok(count)
}

/// Reads and parses the target list at `path`.
pub fn load_target_list(path: impl AsRef<Path>) -> Result<TargetList, ConfigError> {
    let path: &Path = path.as_ref();
    let raw: String = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let list: TargetList = raw.parse()?;
    debug!(
        packets = list.packet_count,
        targets = list.targets.len(),
        "Loaded target list from {}",
        path.display()
    );
    Ok(list)
}

/// Everything the monitor needs for one pass, loaded once at startup.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// Echo requests sent by the full ping stage.
    pub packet_count: u32,
    /// Pause between two consecutive targets.
    pub wait: Duration,
    pub targets: Vec<Target>,
    /// Raise an alert when a target shows no packet loss at all.
    pub alert_on_success: bool,
}

impl MonitorConfig {
    pub fn new(list: TargetList, wait: Duration) -> Self {
        Self {
            packet_count: list.packet_count,
            wait,
            targets: list.targets,
            alert_on_success: true,
        }
    }

    pub fn with_alert_on_success(mut self, enabled: bool) -> Self {
        self.alert_on_success = enabled;
        self
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
