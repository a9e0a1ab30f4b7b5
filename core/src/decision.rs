//! # Alert Decision Engine
//!
//! Turns probe results into alerts and follow-up directives for the monitor.
//! Everything in this module is pure: no processes, no logging, no clock.
//!
//! | Situation                           | Directive              | Alert                   |
//! |-------------------------------------|------------------------|-------------------------|
//! | initial check failed                | trace, skip statistics | Initial Check failed    |
//! | statistics missing                  | none                   | none                    |
//! | ping tool failed                    | trace                  | none                    |
//! | `lost == 0`                         | none                   | No Data Packet loss     |
//! | `lost > 0`                          | trace                  | none                    |
//! | `lost > HIGH_LOSS_PACKETS`          | trace                  | High Packet Loss        |

use routewatch_common::target::Target;

use crate::alert::AlertEvent;
use crate::probe::{FailureReason, Measurement, PingStatistics, ProbeOutcome};

/// Lost packets above this count raise a high loss alert.
pub const HIGH_LOSS_PACKETS: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Collect a route trace for the log.
    RunTrace,
    /// Do not run the full ping stage for this target.
    SkipStatistics,
}

/// What the engine concluded, for the log trail.
#[derive(Clone, Debug, PartialEq)]
pub enum Finding {
    InitialCheckFailed(FailureReason),
    StatisticsUnavailable,
    PingFailed,
    NoPacketLoss { loss: Option<f64> },
    PacketLoss { lost: u32 },
    HighPacketLoss { loss: Option<f64> },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decision {
    pub directives: Vec<Directive>,
    pub findings: Vec<Finding>,
    pub alerts: Vec<AlertEvent>,
}

impl Decision {
    pub fn runs_trace(&self) -> bool {
        self.directives.contains(&Directive::RunTrace)
    }

    pub fn skips_statistics(&self) -> bool {
        self.directives.contains(&Directive::SkipStatistics)
    }

    fn direct(&mut self, directive: Directive) {
        if !self.directives.contains(&directive) {
            self.directives.push(directive);
        }
    }
}

#[derive(Clone, Debug)]
pub struct AlertDecisionEngine {
    alert_on_success: bool,
}

impl Default for AlertDecisionEngine {
    fn default() -> Self {
        Self {
            alert_on_success: true,
        }
    }
}

impl AlertDecisionEngine {
    pub fn new(alert_on_success: bool) -> Self {
        Self { alert_on_success }
    }

    /// Decides on the results gathered so far for `target`.
    ///
    /// Called with `measurement == None` right after the reachability check,
    /// and again once the full ping stage has produced its measurement.
    pub fn decide(
        &self,
        target: &Target,
        initial: &ProbeOutcome,
        measurement: Option<&Measurement>,
    ) -> Decision {
        let mut decision: Decision = Decision::default();

        if !initial.reachable {
            decision.direct(Directive::RunTrace);
            decision.direct(Directive::SkipStatistics);
            decision.findings.push(Finding::InitialCheckFailed(initial.reason));
            decision.alerts.push(AlertEvent::new(
                format!("Initial Check failed: {target}"),
                format!("{}. Check the log for full details.", initial.reason.describe()),
            ));
            return decision;
        }

        match measurement {
            None => {}
            Some(Measurement::Unparsed { .. }) => {
                decision.findings.push(Finding::StatisticsUnavailable);
            }
            Some(Measurement::ExecutionFailed { .. }) => {
                decision.direct(Directive::RunTrace);
                decision.findings.push(Finding::PingFailed);
            }
            Some(Measurement::Stats(stats)) => self.decide_statistics(target, stats, &mut decision),
        }

        decision
    }

    fn decide_statistics(&self, target: &Target, stats: &PingStatistics, decision: &mut Decision) {
        let loss: Option<f64> = stats.loss_percentage();

        if stats.lost == 0 {
            decision.findings.push(Finding::NoPacketLoss { loss });
            if self.alert_on_success {
                decision.alerts.push(AlertEvent::new(
                    format!("No Data Packet loss detected: {target}"),
                    loss_message(stats, loss),
                ));
            }
            return;
        }

        decision.direct(Directive::RunTrace);
        decision.findings.push(Finding::PacketLoss { lost: stats.lost });

        if stats.lost > HIGH_LOSS_PACKETS {
            decision.findings.push(Finding::HighPacketLoss { loss });
            decision.alerts.push(AlertEvent::new(
                format!("High Packet Loss Alert: {target}"),
                loss_message(stats, loss),
            ));
        }
    }
}

/// Renders a loss percentage with two decimals, or `n/a` when undefined.
pub fn format_loss(loss: Option<f64>) -> String {
    match loss {
        Some(pct) => format!("{pct:.2}%"),
        None => "n/a".to_string(),
    }
}

fn loss_message(stats: &PingStatistics, loss: Option<f64>) -> String {
    format!(
        "Loss: {} | Sent: {}, Lost: {}",
        format_loss(loss),
        stats.sent,
        stats.lost
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        "10.0.0.1".parse().unwrap()
    }

    fn reachable() -> ProbeOutcome {
        ProbeOutcome::from_reason(FailureReason::None, String::new())
    }

    fn stats(sent: u32, received: u32, lost: u32) -> Measurement {
        Measurement::Stats(PingStatistics { sent, received, lost })
    }

    #[test]
    fn test_unreachable_traces_skips_and_alerts_once() {
        let engine: AlertDecisionEngine = AlertDecisionEngine::default();
        let initial = ProbeOutcome::from_reason(FailureReason::Timeout, "Request timed out.".into());
        let decision: Decision = engine.decide(&target(), &initial, None);

        assert!(decision.runs_trace());
        assert!(decision.skips_statistics());
        assert_eq!(decision.alerts.len(), 1);
        assert_eq!(decision.alerts[0].title, "Initial Check failed: 10.0.0.1");
        assert!(decision.alerts[0].message.starts_with("Request timed out"));
    }

    #[test]
    fn test_unreachable_ignores_any_measurement() {
        let engine: AlertDecisionEngine = AlertDecisionEngine::default();
        let initial = ProbeOutcome::from_reason(FailureReason::HostUnreachable, String::new());
        let decision: Decision = engine.decide(&target(), &initial, Some(&stats(4, 0, 4)));

        assert_eq!(decision.alerts.len(), 1);
        assert_eq!(
            decision.findings,
            vec![Finding::InitialCheckFailed(FailureReason::HostUnreachable)]
        );
    }

    #[test]
    fn test_reachable_before_measurement_is_silent() {
        let decision: Decision = AlertDecisionEngine::default().decide(&target(), &reachable(), None);
        assert_eq!(decision, Decision::default());
    }

    #[test]
    fn test_zero_loss_raises_single_success_alert() {
        let decision: Decision =
            AlertDecisionEngine::default().decide(&target(), &reachable(), Some(&stats(4, 4, 0)));

        assert!(!decision.runs_trace());
        assert_eq!(decision.alerts.len(), 1);
        assert_eq!(decision.alerts[0].title, "No Data Packet loss detected: 10.0.0.1");
        assert_eq!(decision.alerts[0].message, "Loss: 0.00% | Sent: 4, Lost: 0");
    }

    #[test]
    fn test_zero_loss_alert_can_be_disabled() {
        let decision: Decision =
            AlertDecisionEngine::new(false).decide(&target(), &reachable(), Some(&stats(4, 4, 0)));

        assert!(decision.alerts.is_empty());
        assert_eq!(decision.findings, vec![Finding::NoPacketLoss { loss: Some(0.0) }]);
    }

    #[test]
    fn test_single_lost_packet_traces_without_alert() {
        let decision: Decision =
            AlertDecisionEngine::default().decide(&target(), &reachable(), Some(&stats(4, 3, 1)));

        assert!(decision.runs_trace());
        assert!(decision.alerts.is_empty());
        assert_eq!(decision.findings, vec![Finding::PacketLoss { lost: 1 }]);
    }

    #[test]
    fn test_high_loss_traces_and_alerts() {
        let decision: Decision =
            AlertDecisionEngine::default().decide(&target(), &reachable(), Some(&stats(4, 2, 2)));

        assert!(decision.runs_trace());
        assert!(!decision.skips_statistics());
        assert_eq!(decision.alerts.len(), 1);
        assert_eq!(decision.alerts[0].title, "High Packet Loss Alert: 10.0.0.1");
        assert_eq!(decision.alerts[0].message, "Loss: 50.00% | Sent: 4, Lost: 2");
    }

    #[test]
    fn test_missing_statistics_only_logs() {
        let unparsed = Measurement::Unparsed { raw_text: "???".into() };
        let decision: Decision =
            AlertDecisionEngine::default().decide(&target(), &reachable(), Some(&unparsed));

        assert!(decision.directives.is_empty());
        assert!(decision.alerts.is_empty());
        assert_eq!(decision.findings, vec![Finding::StatisticsUnavailable]);
    }

    #[test]
    fn test_failed_ping_traces_without_alert() {
        let failed = Measurement::ExecutionFailed { raw_text: "General failure.".into() };
        let decision: Decision =
            AlertDecisionEngine::default().decide(&target(), &reachable(), Some(&failed));

        assert_eq!(decision.directives, vec![Directive::RunTrace]);
        assert!(decision.alerts.is_empty());
    }

    #[test]
    fn test_format_loss() {
        assert_eq!(format_loss(Some(66.666)), "66.67%");
        assert_eq!(format_loss(None), "n/a");
    }
}
