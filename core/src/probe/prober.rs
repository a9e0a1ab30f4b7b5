use async_trait::async_trait;
use routewatch_common::target::Target;
use tracing::debug;

use super::{
    CHECK_PACKETS, CommandOutput, CommandRunner, DiagnosticReport, Dialect, FailureReason,
    Measurement, ProbeOutcome, Prober, SystemRunner,
};

/// A [`Prober`] backed by the platform's `ping` and trace tools.
pub struct CommandProber {
    dialect: Dialect,
    runner: Box<dyn CommandRunner>,
}

impl CommandProber {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_runner(dialect, Box::new(SystemRunner))
    }

    pub fn with_runner(dialect: Dialect, runner: Box<dyn CommandRunner>) -> Self {
        Self { dialect, runner }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn ping(&self, target: &Target, packets: u32) -> std::io::Result<CommandOutput> {
        let args: Vec<String> = self.dialect.ping_args(target.as_str(), packets);
        self.runner.run(self.dialect.ping_program(), &args).await
    }
}

#[async_trait]
impl Prober for CommandProber {
    async fn check(&self, target: &Target) -> ProbeOutcome {
        match self.ping(target, CHECK_PACKETS).await {
            // A non-zero exit is not a verdict by itself; only the text decides.
            Ok(output) => {
                let reason: FailureReason = self.dialect.classify(&output.text);
                ProbeOutcome::from_reason(reason, output.text)
            }
            Err(e) => ProbeOutcome::from_reason(
                FailureReason::ToolFailure,
                format!("failed to run {}: {e}", self.dialect.ping_program()),
            ),
        }
    }

    async fn measure(&self, target: &Target, packet_count: u32) -> Measurement {
        let output: CommandOutput = match self.ping(target, packet_count).await {
            Ok(output) => output,
            Err(e) => {
                return Measurement::ExecutionFailed {
                    raw_text: format!("failed to run {}: {e}", self.dialect.ping_program()),
                };
            }
        };

        if let Some(stats) = self.dialect.extract_statistics(&output.text) {
            return Measurement::Stats(stats);
        }

        debug!(code = ?output.code, "no packet summary in ping output for {target}");
        if output.success() {
            Measurement::Unparsed { raw_text: output.text }
        } else {
            Measurement::ExecutionFailed { raw_text: output.text }
        }
    }

    async fn trace(&self, target: &Target) -> DiagnosticReport {
        let program: &str = self.dialect.trace_program();
        let args: Vec<String> = self.dialect.trace_args(target.as_str());

        let raw_trace_text: String = match self.runner.run(program, &args).await {
            Ok(output) => output.text,
            Err(e) => format!("failed to run {program}: {e}"),
        };

        DiagnosticReport {
            target: target.clone(),
            raw_trace_text,
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
