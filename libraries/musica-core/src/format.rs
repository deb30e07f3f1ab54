//! Display formatting for positions and runtimes

/// Format seconds as `m:ss`
///
/// Non-finite or negative input renders as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a total runtime in milliseconds as `Hh Mm`
pub fn format_runtime(total_ms: u64) -> String {
    let hours = total_ms / (1000 * 60 * 60);
    let mins = (total_ms % (1000 * 60 * 60)) / (1000 * 60);
    format!("{hours}h {mins}m")
}
