use std::time::Duration;

use crate::http::RequestResult;
use crate::metrics::StatsSnapshot;
use crate::tester::TesterConfig;

/// Nanoseconds per millisecond.
const NS_PER_MS: u128 = 1_000_000;
/// Milliseconds per second.
const MS_PER_SEC: u128 = 1_000;
/// Hundredths per unit for fixed-point rates.
const RATE_SCALE: u64 = 100;

const STATS_HEADER: &str = "=== API Test Statistics ===";
const STATS_FOOTER: &str = "========================";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn banner_lines(config: &TesterConfig) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Starting API test against {}", config.base_url()));
    lines.push(format!("Endpoint: {}", config.endpoint_url()));
    lines.push(format!(
        "Interval: {} seconds",
        format_secs_value(config.interval())
    ));
    if let Some(count) = config.max_requests() {
        lines.push(format!("Will make {} requests", count));
    }
    lines.push("Press Ctrl+C to stop".to_owned());
    lines.push(String::new());
    lines
}

/// `status` is passed pre-rendered so the caller can colour it.
pub fn request_line(ordinal: u64, status: &str, result: &RequestResult) -> String {
    format!(
        "Request {}: Status={}, Time={}, Timestamp={}",
        ordinal,
        status,
        format_secs(result.elapsed),
        result.timestamp.format(TIMESTAMP_FORMAT)
    )
}

pub fn stats_lines(snapshot: &StatsSnapshot) -> Vec<String> {
    vec![
        String::new(),
        STATS_HEADER.to_owned(),
        format!("Total Requests: {}", snapshot.total_requests),
        format!("Successful: {}", snapshot.successful_requests),
        format!("Errors: {}", snapshot.error_requests),
        format!(
            "Average Response Time: {}",
            format_secs(snapshot.avg_response)
        ),
        format!("Max Response Time: {}", format_secs(snapshot.max_response)),
        format!("Min Response Time: {}", format_secs(snapshot.min_response)),
        format!(
            "Requests/second: {}",
            format_rate_x100(snapshot.requests_per_sec_x100)
        ),
        STATS_FOOTER.to_owned(),
        String::new(),
    ]
}

/// Seconds with three decimals and an `s` suffix, rounded to the millisecond.
pub fn format_secs(value: Duration) -> String {
    format!("{}s", format_secs_value(value))
}

fn format_secs_value(value: Duration) -> String {
    let millis = value
        .as_nanos()
        .saturating_add(NS_PER_MS / 2)
        .checked_div(NS_PER_MS)
        .unwrap_or(0);
    let whole = millis.checked_div(MS_PER_SEC).unwrap_or(0);
    let fraction = millis.checked_rem(MS_PER_SEC).unwrap_or(0);
    format!("{}.{:03}", whole, fraction)
}

pub fn format_rate_x100(value_x100: u64) -> String {
    format!(
        "{}.{:02}",
        value_x100.checked_div(RATE_SCALE).unwrap_or(0),
        value_x100.checked_rem(RATE_SCALE).unwrap_or(0)
    )
}
