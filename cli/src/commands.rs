use std::path::PathBuf;

use clap::Parser;
use routewatch_core::alert::DEFAULT_APP_NAME;
use routewatch_core::probe::Dialect;

#[derive(Parser)]
#[command(name = "routewatch")]
#[command(about = "Checks a list of hosts, traces the route on trouble and raises alerts.")]
#[command(version)]
pub struct CommandLine {
    /// Target list: packet count on the first line, one host per line after it
    #[arg(short, long, default_value = "targets.txt")]
    pub targets: PathBuf,

    /// Seconds to wait between two targets
    #[arg(short, long, default_value_t = 5)]
    pub wait: u64,

    /// Append-only log file
    #[arg(short, long, default_value = "network_monitor.log")]
    pub log_file: PathBuf,

    /// Output dialect of the ping and trace tools [windows, unix]
    #[arg(long)]
    pub dialect: Option<Dialect>,

    /// Pushbullet access token; push alerts are disabled without it
    #[arg(long, env = "PUSHBULLET_TOKEN", hide_env_values = true)]
    pub push_token: Option<String>,

    /// Do not raise desktop notifications
    #[arg(long)]
    pub no_desktop: bool,

    /// Seconds a desktop notification stays visible
    #[arg(long, default_value_t = 10)]
    pub desktop_timeout: u64,

    /// Application label shown on desktop notifications
    #[arg(long, default_value = DEFAULT_APP_NAME)]
    pub app_name: String,

    /// Do not alert when a target shows no packet loss
    #[arg(long)]
    pub no_success_alerts: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
