//! The central **abstraction** for probing a target.
//!
//! A [`Prober`] answers three questions about a host: is it reachable at all
//! ([`Prober::check`]), how many echo requests came back ([`Prober::measure`]),
//! and what does the path towards it look like ([`Prober::trace`]).
//!
//! The monitor depends only on this trait. The concrete [`CommandProber`] shells
//! out to the platform's `ping` and trace tools and interprets their text
//! through a [`Dialect`].

use async_trait::async_trait;
use routewatch_common::target::Target;

mod command;
mod dialect;
mod prober;

pub use command::{CommandOutput, CommandRunner, SystemRunner};
pub use dialect::Dialect;
pub use prober::CommandProber;

/// Echo requests sent by the quick reachability check.
pub const CHECK_PACKETS: u32 = 2;

/// Why the initial reachability check failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    None,
    HostUnreachable,
    Timeout,
    ResolutionFailure,
    /// The probe tool itself could not be started.
    ToolFailure,
}

impl FailureReason {
    pub fn describe(&self) -> &'static str {
        match self {
            FailureReason::None => "reachable",
            FailureReason::HostUnreachable => "Destination host unreachable",
            FailureReason::Timeout => "Request timed out",
            FailureReason::ResolutionFailure => "Could not resolve host",
            FailureReason::ToolFailure => "Probe tool could not be run",
        }
    }
}

/// Result of the quick reachability check.
///
/// `reason` is [`FailureReason::None`] exactly when `reachable` is true.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub reachable: bool,
    pub raw_text: String,
    pub reason: FailureReason,
}

impl ProbeOutcome {
    pub fn from_reason(reason: FailureReason, raw_text: String) -> Self {
        Self {
            reachable: reason == FailureReason::None,
            raw_text,
            reason,
        }
    }
}

/// Packet accounting reported by the full ping stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PingStatistics {
    pub sent: u32,
    pub received: u32,
    pub lost: u32,
}

impl PingStatistics {
    /// Lost share of answered plus lost packets, in percent.
    ///
    /// Returns `None` when nothing was accounted for at all.
    pub fn loss_percentage(&self) -> Option<f64> {
        // Both counters come straight from tool output and may be huge.
        let total: u64 = u64::from(self.received) + u64::from(self.lost);
        if total == 0 {
            return None;
        }
        Some(f64::from(self.lost) / total as f64 * 100.0)
    }
}

/// What the full ping stage produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Measurement {
    /// The summary line was found.
    Stats(PingStatistics),
    /// The tool ran and exited cleanly, but printed no recognizable summary.
    Unparsed { raw_text: String },
    /// The tool could not be started, or failed without printing a summary.
    ExecutionFailed { raw_text: String },
}

/// Hop-by-hop path text collected as a fallback diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub target: Target,
    pub raw_trace_text: String,
}

#[async_trait]
pub trait Prober: Send + Sync {
    /// Quick reachability check with [`CHECK_PACKETS`] echo requests.
    async fn check(&self, target: &Target) -> ProbeOutcome;

    /// Full statistical ping with `packet_count` echo requests.
    async fn measure(&self, target: &Target, packet_count: u32) -> Measurement;

    /// Route trace. The text is returned verbatim, whether the tool succeeded or not.
    async fn trace(&self, target: &Target) -> DiagnosticReport;
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
