use std::time::Duration;

use super::{RunState, StatsSnapshot};

fn state_with(samples: &[(bool, u64)]) -> RunState {
    let mut state = RunState::start();
    for (success, elapsed_ms) in samples {
        state.begin_request();
        state.record(*success, Duration::from_millis(*elapsed_ms));
    }
    state
}

#[test]
fn empty_state_has_no_snapshot() -> Result<(), String> {
    let state = RunState::start();
    if state.snapshot().is_some() {
        return Err("Expected no snapshot before the first sample".to_owned());
    }
    if StatsSnapshot::compute(&state, Duration::ZERO).is_some() {
        return Err("Expected no snapshot with zero elapsed".to_owned());
    }
    Ok(())
}

#[test]
fn begin_request_returns_one_based_ordinals() -> Result<(), String> {
    let mut state = RunState::start();
    let first = state.begin_request();
    state.record(true, Duration::from_millis(1));
    let second = state.begin_request();
    if (first, second) != (1, 2) {
        return Err(format!("Unexpected ordinals: {} {}", first, second));
    }
    if state.total_requests() != 2 || state.response_times().len() != 1 {
        return Err("In-flight request should be counted but not sampled".to_owned());
    }
    Ok(())
}

#[test]
fn counters_stay_consistent_with_samples() -> Result<(), String> {
    let state = state_with(&[(true, 10), (false, 20), (true, 30), (false, 40), (false, 5)]);
    let total = state.total_requests();
    if state.successful_requests() != 2 || state.error_requests() != 3 {
        return Err("Unexpected success/error split".to_owned());
    }
    if state.successful_requests().saturating_add(state.error_requests()) != total {
        return Err("successful + errors must equal total".to_owned());
    }
    if u64::try_from(state.response_times().len()).ok() != Some(total) {
        return Err("Expected one sample per request".to_owned());
    }
    Ok(())
}

#[test]
fn snapshot_computes_avg_min_max() -> Result<(), String> {
    let state = state_with(&[(true, 100), (true, 200), (true, 600)]);
    let snapshot = StatsSnapshot::compute(&state, Duration::from_secs(2))
        .ok_or_else(|| "Expected snapshot".to_owned())?;

    let expected = StatsSnapshot {
        total_requests: 3,
        successful_requests: 3,
        error_requests: 0,
        sample_count: 3,
        avg_response: Duration::from_millis(300),
        max_response: Duration::from_millis(600),
        min_response: Duration::from_millis(100),
        wall_elapsed: Duration::from_secs(2),
        requests_per_sec_x100: 150,
    };
    if snapshot != expected {
        return Err(format!("Unexpected snapshot: {:?}", snapshot));
    }
    Ok(())
}

#[test]
fn throughput_survives_zero_wall_clock() -> Result<(), String> {
    let state = state_with(&[(true, 0)]);
    let snapshot = StatsSnapshot::compute(&state, Duration::ZERO)
        .ok_or_else(|| "Expected snapshot".to_owned())?;
    if snapshot.requests_per_sec_x100 == 0 {
        return Err("Expected a large, finite rate for a zero wall clock".to_owned());
    }
    Ok(())
}

#[test]
fn throughput_for_tiny_wall_clock_is_finite() -> Result<(), String> {
    let state = state_with(&[(true, 1), (false, 1)]);
    let snapshot = StatsSnapshot::compute(&state, Duration::from_nanos(1))
        .ok_or_else(|| "Expected snapshot".to_owned())?;
    if snapshot.requests_per_sec_x100 != 200_000_000_000 {
        return Err(format!(
            "Unexpected rate: {}",
            snapshot.requests_per_sec_x100
        ));
    }
    Ok(())
}

#[test]
fn snapshot_is_cumulative() -> Result<(), String> {
    let mut state = state_with(&[(true, 50); 10]);
    let first = StatsSnapshot::compute(&state, Duration::from_secs(10))
        .ok_or_else(|| "Expected first snapshot".to_owned())?;
    state.begin_request();
    state.record(false, Duration::from_millis(160));
    let second = StatsSnapshot::compute(&state, Duration::from_secs(11))
        .ok_or_else(|| "Expected second snapshot".to_owned())?;

    if first.total_requests != 10 || second.total_requests != 11 {
        return Err("Counters must not reset between snapshots".to_owned());
    }
    if second.avg_response != Duration::from_millis(60) {
        return Err(format!("Unexpected average: {:?}", second.avg_response));
    }
    if second.max_response != Duration::from_millis(160) || second.error_requests != 1 {
        return Err("Unexpected cumulative max/errors".to_owned());
    }
    Ok(())
}
