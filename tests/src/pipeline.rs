use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use routewatch_common::config::{self, ConfigError, MonitorConfig, TargetList};
use routewatch_core::alert::{
    AlertChannel, AlertDispatcher, AlertEvent, ChannelError, DesktopChannel,
};
use routewatch_core::monitor::{Monitor, PassSummary};
use routewatch_core::probe::{CommandOutput, CommandProber, CommandRunner, Dialect};

type Calls = Arc<Mutex<Vec<String>>>;

/// Serves canned Windows tool output keyed by host and stage.
struct ScriptedTools {
    checks: HashMap<&'static str, &'static str>,
    pings: HashMap<&'static str, (i32, &'static str)>,
    calls: Calls,
}

impl ScriptedTools {
    fn new(calls: Calls) -> Self {
        Self {
            checks: HashMap::new(),
            pings: HashMap::new(),
            calls,
        }
    }

    fn check(mut self, host: &'static str, text: &'static str) -> Self {
        self.checks.insert(host, text);
        self
    }

    fn ping(mut self, host: &'static str, code: i32, text: &'static str) -> Self {
        self.pings.insert(host, (code, text));
        self
    }
}

#[async_trait]
impl CommandRunner for ScriptedTools {
    async fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{program} {}", args.join(" ")));

        let host: &str = args.last().map(String::as_str).unwrap_or_default();
        let (code, text) = match (program, args.first().map(String::as_str)) {
            ("ping", Some("-n")) if args[1] == "2" => {
                (0, self.checks.get(host).copied().unwrap_or(REPLY_OK))
            }
            ("ping", _) => self.pings.get(host).copied().unwrap_or((0, "")),
            ("tracert", _) => (0, TRACE),
            _ => return Err(std::io::Error::other("unexpected program")),
        };

        Ok(CommandOutput {
            code: Some(code),
            text: text.to_string(),
        })
    }
}

const REPLY_OK: &str = "Reply from 10.0.0.1: bytes=32 time=2ms TTL=63";
const TRACE: &str = "  1    <1 ms    <1 ms    <1 ms  192.168.1.1\n  2     *        *        *     Request timed out.";

struct Inbox(Arc<Mutex<Vec<AlertEvent>>>);

#[async_trait]
impl AlertChannel for Inbox {
    fn name(&self) -> &str {
        "Inbox"
    }

    async fn deliver(&self, event: &AlertEvent) -> Result<(), ChannelError> {
        self.0.lock().unwrap().push(event.clone());
        Ok(())
    }
}

fn build(
    raw_list: &str,
    tools: ScriptedTools,
    dispatcher: AlertDispatcher,
) -> Monitor<CommandProber> {
    let list: TargetList = raw_list.parse().expect("target list should parse");
    let cfg: MonitorConfig = MonitorConfig::new(list, Duration::ZERO);
    let prober = CommandProber::with_runner(Dialect::Windows, Box::new(tools));
    Monitor::new(cfg, prober, dispatcher)
}

/// A single reachable target losing two of three packets is traced and
/// raises exactly one high loss alert.
#[tokio::test]
async fn high_loss_single_target_pass() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let tools = ScriptedTools::new(calls.clone()).ping(
        "10.0.0.1",
        1,
        "Ping statistics for 10.0.0.1:\n    Packets: Sent = 3, Received = 1, Lost = 2 (66% loss),",
    );
    let inbox: Arc<Mutex<Vec<AlertEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = AlertDispatcher::new().with_channel(Box::new(Inbox(inbox.clone())));

    let summary: PassSummary = build("3\n10.0.0.1\n", tools, dispatcher).run_pass().await;

    assert_eq!(
        *calls.lock().unwrap(),
        vec!["ping -n 2 10.0.0.1", "ping -n 3 10.0.0.1", "tracert 10.0.0.1"]
    );
    assert_eq!(summary.targets_checked, 1);
    assert_eq!(summary.traces_run, 1);
    assert!(!summary.cancelled);

    let alerts = inbox.lock().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].title, "High Packet Loss Alert: 10.0.0.1");
    assert_eq!(alerts[0].message, "Loss: 66.67% | Sent: 3, Lost: 2");
}

#[tokio::test]
async fn unreachable_target_never_reaches_statistics_stage() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let tools = ScriptedTools::new(calls.clone())
        .check("10.0.0.9", "Request timed out.\nRequest timed out.")
        .ping("10.0.0.1", 0, "Packets: Sent = 4, Received = 4, Lost = 0 (0% loss),");
    let inbox: Arc<Mutex<Vec<AlertEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = AlertDispatcher::new().with_channel(Box::new(Inbox(inbox.clone())));

    let summary: PassSummary = build("4\n10.0.0.9\n10.0.0.1", tools, dispatcher)
        .run_pass()
        .await;

    assert_eq!(
        *calls.lock().unwrap(),
        vec![
            "ping -n 2 10.0.0.9",
            "tracert 10.0.0.9",
            "ping -n 2 10.0.0.1",
            "ping -n 4 10.0.0.1",
        ]
    );
    assert_eq!(summary.targets_checked, 2);

    let titles: Vec<String> = inbox.lock().unwrap().iter().map(|a| a.title.clone()).collect();
    assert_eq!(
        titles,
        vec!["Initial Check failed: 10.0.0.9", "No Data Packet loss detected: 10.0.0.1"]
    );
}

#[tokio::test]
async fn unparsable_statistics_are_logged_only() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let tools = ScriptedTools::new(calls.clone()).ping("h", 0, "output in another language");
    let inbox: Arc<Mutex<Vec<AlertEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = AlertDispatcher::new().with_channel(Box::new(Inbox(inbox.clone())));

    let summary: PassSummary = build("5\nh", tools, dispatcher).run_pass().await;

    assert_eq!(summary.alerts_raised, 0);
    assert_eq!(summary.traces_run, 0);
    assert!(inbox.lock().unwrap().is_empty());
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn broken_desktop_channel_does_not_stop_push_delivery() {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let tools = ScriptedTools::new(calls)
        .check("a", "Reply from a: Destination host unreachable.")
        .check("b", "Ping request could not find host b.");
    let inbox: Arc<Mutex<Vec<AlertEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = AlertDispatcher::new()
        .with_channel(Box::new(
            DesktopChannel::default().with_program("routewatch-no-such-notifier"),
        ))
        .with_channel(Box::new(Inbox(inbox.clone())));

    let summary: PassSummary = build("2\na\nb", tools, dispatcher).run_pass().await;

    assert_eq!(summary.targets_checked, 2);
    assert_eq!(summary.alerts_raised, 2);
    assert_eq!(summary.delivery_failures, 2);
    assert_eq!(inbox.lock().unwrap().len(), 2);
}

#[test]
fn malformed_target_list_fails_before_probing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "three").unwrap();
    writeln!(file, "10.0.0.1").unwrap();

    let err: ConfigError = config::load_target_list(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPacketCount { line: 1, .. }));
}

#[test]
fn well_formed_target_list_loads_in_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "\n5\n\nrouter.lan\n8.8.8.8\n\n").unwrap();

    let list: TargetList = config::load_target_list(file.path()).unwrap();
    assert_eq!(list.packet_count, 5);
    let hosts: Vec<String> = list.targets.iter().map(|t| t.to_string()).collect();
    assert_eq!(hosts, vec!["router.lan", "8.8.8.8"]);
}
