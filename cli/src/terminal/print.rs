use routewatch_core::monitor::PassSummary;
use tracing::info;

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    info!("{msg}");
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    print(&format!("{}{}{}", "─".repeat(left), formatted, "─".repeat(right)));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH));
}

pub fn aligned_line<V: std::fmt::Display>(key: &str, value: V, key_width: usize) {
    let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
    print(&format!("> {key}{dots}: {value}"));
}

pub fn pass_summary(summary: &PassSummary) {
    const KEY_WIDTH: usize = 17;

    fat_separator();
    aligned_line("Targets checked", summary.targets_checked, KEY_WIDTH);
    aligned_line("Alerts raised", summary.alerts_raised, KEY_WIDTH);
    aligned_line("Delivery failures", summary.delivery_failures, KEY_WIDTH);
    aligned_line("Traces run", summary.traces_run, KEY_WIDTH);
    if summary.cancelled {
        aligned_line("Status", "cancelled by operator", KEY_WIDTH);
    }
    fat_separator();
}
