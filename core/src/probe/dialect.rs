//! Text dialects of the platform probe tools.
//!
//! Both `ping` implementations report failures only as prose, so outcome
//! classification is substring matching against wording that differs per
//! platform. Each dialect carries its own command lines, failure phrases and
//! summary pattern; everything here is pure and works on captured text.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::{FailureReason, PingStatistics};

/// Failure phrases in priority order. The first group with a match wins.
type Rules = [(FailureReason, &'static [&'static str]); 3];

const WINDOWS_RULES: Rules = [
    (FailureReason::HostUnreachable, &["host unreachable"]),
    (FailureReason::Timeout, &["timed out"]),
    (FailureReason::ResolutionFailure, &["could not find host"]),
];

const UNIX_RULES: Rules = [
    (
        FailureReason::HostUnreachable,
        &["Destination Host Unreachable", "Network is unreachable"],
    ),
    (FailureReason::Timeout, &[", 0 received", ", 0 packets received"]),
    (
        FailureReason::ResolutionFailure,
        &[
            "Name or service not known",
            "Temporary failure in name resolution",
            "cannot resolve",
            "Unknown host",
            "unknown host",
        ],
    ),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// `ping -n` and `tracert`.
    Windows,
    /// iputils/BSD `ping -c` and `traceroute`.
    Unix,
}

impl Dialect {
    /// The dialect of the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            Dialect::Windows
        } else {
            Dialect::Unix
        }
    }

    pub fn ping_program(&self) -> &'static str {
        "ping"
    }

    pub fn ping_args(&self, target: &str, packets: u32) -> Vec<String> {
        let count_flag: &str = match self {
            Dialect::Windows => "-n",
            Dialect::Unix => "-c",
        };
        vec![count_flag.to_string(), packets.to_string(), target.to_string()]
    }

    pub fn trace_program(&self) -> &'static str {
        match self {
            Dialect::Windows => "tracert",
            Dialect::Unix => "traceroute",
        }
    }

    pub fn trace_args(&self, target: &str) -> Vec<String> {
        vec![target.to_string()]
    }

    fn rules(&self) -> &'static Rules {
        match self {
            Dialect::Windows => &WINDOWS_RULES,
            Dialect::Unix => &UNIX_RULES,
        }
    }

    /// Classifies the output of a quick reachability check.
    ///
    /// Matching is case-sensitive. Text that matches none of the failure
    /// phrases is considered reachable, whatever the tool's exit code was.
    pub fn classify(&self, text: &str) -> FailureReason {
        self.rules()
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|phrase| text.contains(phrase)))
            .map(|(reason, _)| *reason)
            .unwrap_or(FailureReason::None)
    }

    /// Extracts the packet summary from full ping output.
    ///
    /// Returns `None` when the summary line is missing, never a zeroed result.
    pub fn extract_statistics(&self, text: &str) -> Option<PingStatistics> {
        match self {
            Dialect::Windows => {
                let caps = windows_summary().captures(text)?;
                Some(PingStatistics {
                    sent: caps[1].parse().ok()?,
                    received: caps[2].parse().ok()?,
                    lost: caps[3].parse().ok()?,
                })
            }
            Dialect::Unix => {
                let caps = unix_summary().captures(text)?;
                let sent: u32 = caps[1].parse().ok()?;
                let received: u32 = caps[2].parse().ok()?;
                Some(PingStatistics {
                    sent,
                    received,
                    lost: sent.saturating_sub(received),
                })
            }
        }
    }
}

fn windows_summary() -> &'static Regex {
    static SUMMARY: OnceLock<Regex> = OnceLock::new();
    SUMMARY.get_or_init(|| {
        Regex::new(r"Sent = (\d+), Received = (\d+), Lost = (\d+)")
            .expect("failed to compile windows summary regex")
    })
}

fn unix_summary() -> &'static Regex {
    static SUMMARY: OnceLock<Regex> = OnceLock::new();
    SUMMARY.get_or_init(|| {
        Regex::new(r"(\d+) packets transmitted, (\d+) (?:packets )?received")
            .expect("failed to compile unix summary regex")
    })
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Dialect::Windows),
            "unix" | "linux" | "macos" => Ok(Dialect::Unix),
            other => Err(format!("unknown probe dialect: {other}")),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Windows => f.write_str("windows"),
            Dialect::Unix => f.write_str("unix"),
        }
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
