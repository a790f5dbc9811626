/// Format a millisecond duration as `m:ss` for display.
pub fn format_clock(ms: f64) -> String {
    let total_secs = (ms / 1000.0).round().max(0.0) as u64;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
