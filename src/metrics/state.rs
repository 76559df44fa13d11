use std::time::Duration;

use tokio::time::Instant;

use super::stats::StatsSnapshot;

/// Mutable counters owned by the request loop.
///
/// `total_requests` is bumped before a request is sent, so while one is in
/// flight it runs one ahead of `successful + errors`; after `record` they
/// agree again and `response_times` holds exactly one sample per request.
#[derive(Debug, Clone)]
pub struct RunState {
    started_at: Instant,
    total_requests: u64,
    successful_requests: u64,
    error_requests: u64,
    response_times: Vec<Duration>,
}

impl RunState {
    #[must_use]
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
            total_requests: 0,
            successful_requests: 0,
            error_requests: 0,
            response_times: Vec::new(),
        }
    }

    /// Counts a request as issued and returns its 1-based ordinal.
    pub fn begin_request(&mut self) -> u64 {
        self.total_requests = self.total_requests.saturating_add(1);
        self.total_requests
    }

    pub fn record(&mut self, success: bool, elapsed: Duration) {
        if success {
            self.successful_requests = self.successful_requests.saturating_add(1);
        } else {
            self.error_requests = self.error_requests.saturating_add(1);
        }
        self.response_times.push(elapsed);
    }

    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.total_requests
    }

    #[must_use]
    pub const fn successful_requests(&self) -> u64 {
        self.successful_requests
    }

    #[must_use]
    pub const fn error_requests(&self) -> u64 {
        self.error_requests
    }

    #[must_use]
    pub fn response_times(&self) -> &[Duration] {
        &self.response_times
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Cumulative statistics for the whole run so far, or `None` before the
    /// first sample.
    #[must_use]
    pub fn snapshot(&self) -> Option<StatsSnapshot> {
        StatsSnapshot::compute(self, self.elapsed())
    }
}
