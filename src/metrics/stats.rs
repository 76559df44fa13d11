use std::time::Duration;

use super::state::RunState;

/// Nanoseconds per second.
const NS_PER_SEC: u128 = 1_000_000_000;
/// Fixed-point scale for requests/second (two decimals).
const RATE_SCALE: u128 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub error_requests: u64,
    pub sample_count: usize,
    pub avg_response: Duration,
    pub max_response: Duration,
    pub min_response: Duration,
    pub wall_elapsed: Duration,
    /// Requests per second multiplied by 100.
    pub requests_per_sec_x100: u64,
}

impl StatsSnapshot {
    /// Returns `None` when no request has completed yet.
    #[must_use]
    pub fn compute(state: &RunState, wall_elapsed: Duration) -> Option<Self> {
        let samples = state.response_times();
        let max_response = samples.iter().max().copied()?;
        let min_response = samples.iter().min().copied()?;

        Some(Self {
            total_requests: state.total_requests(),
            successful_requests: state.successful_requests(),
            error_requests: state.error_requests(),
            sample_count: samples.len(),
            avg_response: average(samples),
            max_response,
            min_response,
            wall_elapsed,
            requests_per_sec_x100: rate_x100(state.total_requests(), wall_elapsed),
        })
    }
}

fn average(samples: &[Duration]) -> Duration {
    let count = u128::try_from(samples.len()).unwrap_or(u128::MAX).max(1);
    let total_ns = samples
        .iter()
        .fold(0u128, |acc, sample| acc.saturating_add(sample.as_nanos()));
    let avg_ns = total_ns.checked_div(count).unwrap_or(0);
    Duration::from_nanos(u64::try_from(avg_ns).unwrap_or(u64::MAX))
}

/// A sub-nanosecond wall clock is clamped to 1ns so the rate stays finite.
fn rate_x100(total_requests: u64, wall_elapsed: Duration) -> u64 {
    let elapsed_ns = wall_elapsed.as_nanos().max(1);
    let scaled = u128::from(total_requests)
        .saturating_mul(RATE_SCALE)
        .saturating_mul(NS_PER_SEC)
        .checked_div(elapsed_ns)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
