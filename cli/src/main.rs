mod commands;
mod terminal;

use std::time::Duration;

use anyhow::Context;
use commands::CommandLine;
use routewatch_common::config::{self, MonitorConfig, TargetList};
use routewatch_core::alert::{AlertDispatcher, DesktopChannel, PushbulletChannel};
use routewatch_core::monitor::{Monitor, PassSummary};
use routewatch_core::probe::{CommandProber, Dialect};
use routewatch_core::shutdown::Shutdown;
use terminal::{logging, print};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Lets the push token live in a local .env file instead of the shell.
    dotenvy::dotenv().ok();
    let commands: CommandLine = CommandLine::parse_args();

    logging::init_logging(&commands.log_file)?;
    print::header("routewatch monitoring pass");

    let list: TargetList = config::load_target_list(&commands.targets).inspect_err(|e| {
        error!("Cannot start: {e}");
    })?;

    let cfg: MonitorConfig = MonitorConfig::new(list, Duration::from_secs(commands.wait))
        .with_alert_on_success(!commands.no_success_alerts);
    info!(
        "Loaded {} targets, {} packets per ping, {}s between targets",
        cfg.targets.len(),
        cfg.packet_count,
        cfg.wait.as_secs()
    );

    let dialect: Dialect = commands.dialect.unwrap_or_else(Dialect::native);
    let prober: CommandProber = CommandProber::new(dialect);
    info!("Using {} ping and trace commands", prober.dialect());

    let dispatcher: AlertDispatcher = build_dispatcher(&commands)?;
    let monitor = Monitor::new(cfg, prober, dispatcher);

    watch_for_interrupt(monitor.shutdown());

    let summary: PassSummary = monitor.run_pass().await;
    print::pass_summary(&summary);
    Ok(())
}

fn build_dispatcher(commands: &CommandLine) -> anyhow::Result<AlertDispatcher> {
    let mut dispatcher: AlertDispatcher = AlertDispatcher::new();

    if !commands.no_desktop {
        let timeout: Duration = Duration::from_secs(commands.desktop_timeout);
        dispatcher.add_channel(Box::new(DesktopChannel::new(&commands.app_name, timeout)));
    }

    match commands.push_token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => {
            let channel = PushbulletChannel::new(token).context("creating the push client")?;
            dispatcher.add_channel(Box::new(channel));
        }
        _ => warn!("No Pushbullet token configured, push alerts are disabled"),
    }

    if dispatcher.channel_count() == 0 {
        warn!("All alert channels are disabled, alerts will only be logged");
    }

    Ok(dispatcher)
}

/// Stops the pass at the next checkpoint on Ctrl-C.
fn watch_for_interrupt(shutdown: Shutdown) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current stage");
            shutdown.trigger();
        }
    });
}
