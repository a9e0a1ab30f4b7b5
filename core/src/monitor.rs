//! # Monitoring Pass
//!
//! Drives one pass over the configured targets. Each target goes through the
//! staged pipeline, strictly one at a time:
//!
//! 1. quick reachability check; on failure trace, alert and move on
//! 2. full statistical ping
//! 3. decision, then the optional trace and alerts it asks for
//!
//! The monitor sleeps for the configured wait between targets, never after
//! the last one. A failure on one target never aborts the pass.
//!
//! Shutdown is honoured between stages: a running probe finishes, but no
//! later stage of that target runs, alerts included.

use routewatch_common::config::MonitorConfig;
use routewatch_common::target::Target;
use tracing::{Instrument, error, info, info_span, warn};

use crate::alert::{AlertDispatcher, AlertEvent, DispatchReport};
use crate::decision::{AlertDecisionEngine, Decision, Finding, format_loss};
use crate::probe::{DiagnosticReport, Measurement, ProbeOutcome, Prober};
use crate::shutdown::Shutdown;

const BANNER_WIDTH: usize = 50;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub targets_checked: usize,
    pub alerts_raised: usize,
    pub delivery_failures: usize,
    pub traces_run: usize,
    pub cancelled: bool,
}

#[derive(Default)]
struct TargetReport {
    alerts_raised: usize,
    delivery_failures: usize,
    traced: bool,
    interrupted: bool,
}

pub struct Monitor<P: Prober> {
    config: MonitorConfig,
    prober: P,
    engine: AlertDecisionEngine,
    dispatcher: AlertDispatcher,
    shutdown: Shutdown,
}

impl<P: Prober> Monitor<P> {
    pub fn new(config: MonitorConfig, prober: P, dispatcher: AlertDispatcher) -> Self {
        let engine: AlertDecisionEngine = AlertDecisionEngine::new(config.alert_on_success);
        Self {
            config,
            prober,
            engine,
            dispatcher,
            shutdown: Shutdown::new(),
        }
    }

    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn shutdown(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Runs a single pass over every target, in configured order.
    pub async fn run_pass(&self) -> PassSummary {
        let mut summary: PassSummary = PassSummary::default();
        let total: usize = self.config.targets.len();

        for (idx, target) in self.config.targets.iter().enumerate() {
            if self.shutdown.is_triggered() {
                summary.cancelled = true;
                break;
            }

            let span = info_span!("target", host = %target);
            let report: TargetReport = self.process_target(target).instrument(span).await;

            summary.targets_checked += 1;
            summary.alerts_raised += report.alerts_raised;
            summary.delivery_failures += report.delivery_failures;
            summary.traces_run += usize::from(report.traced);

            if report.interrupted {
                summary.cancelled = true;
                break;
            }

            if idx + 1 < total && !self.shutdown.sleep(self.config.wait).await {
                summary.cancelled = true;
                break;
            }
        }

        if summary.cancelled {
            warn!("Monitoring pass cancelled after {} of {total} targets", summary.targets_checked);
        }

        info!(
            "Pass complete: {} targets checked, {} alerts raised, {} traces run",
            summary.targets_checked, summary.alerts_raised, summary.traces_run
        );
        summary
    }

    async fn process_target(&self, target: &Target) -> TargetReport {
        let mut report: TargetReport = TargetReport::default();
        info!("--- Starting check for {target} ---");

        let initial: ProbeOutcome = self.prober.check(target).await;
        let decision: Decision = self.engine.decide(target, &initial, None);

        if decision.skips_statistics() {
            warn!("Initial check failed: {}", initial.reason.describe());
            info!("Ping output:\n{}", initial.raw_text);
            self.follow_up(target, &decision, &mut report).await;
            return report;
        }

        info!("Initial connectivity check successful to {target}");
        if self.shutdown.is_triggered() {
            report.interrupted = true;
            return report;
        }

        let measurement: Measurement = self.prober.measure(target, self.config.packet_count).await;
        log_measurement(target, &measurement);

        let decision: Decision = self.engine.decide(target, &initial, Some(&measurement));
        self.follow_up(target, &decision, &mut report).await;

        let stars: String = "*".repeat(BANNER_WIDTH);
        info!("{stars} END OF PING TEST {stars}");
        report
    }

    /// Logs findings, runs the trace if asked to, then raises the alerts.
    async fn follow_up(&self, target: &Target, decision: &Decision, report: &mut TargetReport) {
        for finding in &decision.findings {
            log_finding(target, finding);
        }

        if decision.runs_trace() {
            if self.shutdown.is_triggered() {
                report.interrupted = true;
                return;
            }
            let trace: DiagnosticReport = self.prober.trace(target).await;
            info!("Traceroute output:\n{}\n", trace.raw_trace_text);
            report.traced = true;
        }

        if self.shutdown.is_triggered() {
            if !decision.alerts.is_empty() {
                warn!("Shutdown requested, {} alert(s) for {target} not sent", decision.alerts.len());
            }
            report.interrupted = true;
            return;
        }

        for alert in &decision.alerts {
            let delivery: DispatchReport = self.raise(alert).await;
            report.alerts_raised += 1;
            report.delivery_failures += delivery.failed.len();
        }
    }

    async fn raise(&self, alert: &AlertEvent) -> DispatchReport {
        info!("Raising alert: {}", alert.title);
        self.dispatcher.dispatch(alert).await
    }
}

fn log_measurement(target: &Target, measurement: &Measurement) {
    match measurement {
        Measurement::Stats(stats) => {
            info!("Ping successful: {target}");
            info!(
                "Round Trip Results: Packets Sent: {}, Packets Received: {}, Packets Lost: {}",
                stats.sent, stats.received, stats.lost
            );
        }
        Measurement::Unparsed { raw_text } => {
            info!("Ping output:\n{raw_text}");
        }
        Measurement::ExecutionFailed { raw_text } => {
            error!("Full error log:\n{raw_text}");
        }
    }
}

fn log_finding(target: &Target, finding: &Finding) {
    match finding {
        // Already reported alongside the raw check output.
        Finding::InitialCheckFailed(_) => {}
        Finding::StatisticsUnavailable => {
            warn!("Could not extract packet statistics for {target}")
        }
        Finding::PingFailed => error!("Ping failed: {target}"),
        Finding::NoPacketLoss { loss } => {
            info!("No data packet loss detected ({})", format_loss(*loss))
        }
        Finding::PacketLoss { lost } => {
            warn!("{lost} packet(s) lost, tracing which router failed to route the data packets...")
        }
        Finding::HighPacketLoss { loss } => {
            warn!("High packet loss detected! Loss: {}", format_loss(*loss))
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
