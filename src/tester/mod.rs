//! The request/measure/report loop.
mod request;
mod settings;


use std::time::Duration;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use crate::http::{RequestResult, Transport};
use crate::metrics::RunState;
use crate::report::Reporter;
use crate::shutdown::ShutdownReceiver;

pub use request::{abandoned_request, issue_request};
pub use settings::{ENDPOINT_PATH, TesterConfig};

/// An intermediate statistics block is printed after every this many requests.
pub const STATS_EVERY: u64 = 10;
/// Shutdown notifications received mid-request before that request is abandoned.
const ABANDON_AFTER_INTERRUPTS: u64 = 2;
/// Clamp for intervals too large to add to the clock.
const MAX_PAUSE: Duration = Duration::from_secs(86_400 * 365 * 30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The request cap was reached.
    Completed,
    /// A shutdown signal arrived.
    Interrupted,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub state: RunState,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone)]
pub struct Tester {
    config: TesterConfig,
}

impl Tester {
    #[must_use]
    pub const fn new(config: TesterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &TesterConfig {
        &self.config
    }

    /// Runs until the cap is reached or shutdown is signalled, then reports
    /// the final statistics exactly once.
    pub async fn run<T, R>(
        &self,
        transport: &T,
        reporter: &mut R,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> RunOutcome
    where
        T: Transport + ?Sized,
        R: Reporter + ?Sized,
    {
        reporter.run_started(&self.config);
        let mut state = RunState::start();
        debug!(
            url = self.config.endpoint_url(),
            interval_ms = u64::try_from(self.config.interval().as_millis()).unwrap_or(u64::MAX),
            max_requests = ?self.config.max_requests(),
            "Run started"
        );

        let stop_reason = self
            .drive(transport, reporter, &mut state, shutdown_rx)
            .await;

        if stop_reason == StopReason::Interrupted {
            reporter.interrupted();
        }
        if let Some(snapshot) = state.snapshot() {
            reporter.statistics(&snapshot);
        }
        debug!(
            total = state.total_requests(),
            successful = state.successful_requests(),
            errors = state.error_requests(),
            ?stop_reason,
            "Run stopped"
        );

        RunOutcome { state, stop_reason }
    }

    async fn drive<T, R>(
        &self,
        transport: &T,
        reporter: &mut R,
        state: &mut RunState,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> StopReason
    where
        T: Transport + ?Sized,
        R: Reporter + ?Sized,
    {
        loop {
            if !self.config.allows_another(state.total_requests()) {
                return StopReason::Completed;
            }
            if shutdown_requested(shutdown_rx) {
                return StopReason::Interrupted;
            }

            let ordinal = state.begin_request();
            let (result, interrupted) = self.await_request(transport, shutdown_rx).await;
            state.record(result.outcome.is_success(), result.elapsed);
            reporter.request_completed(ordinal, &result);

            if ordinal.checked_rem(STATS_EVERY) == Some(0)
                && let Some(snapshot) = state.snapshot()
            {
                reporter.statistics(&snapshot);
            }

            if interrupted {
                return StopReason::Interrupted;
            }
            // No pause after the last permitted request.
            if !self.config.allows_another(state.total_requests()) {
                return StopReason::Completed;
            }
            if self.pause(shutdown_rx).await {
                return StopReason::Interrupted;
            }
        }
    }

    /// Awaits the in-flight request. A first shutdown lets it resolve and
    /// marks the run as interrupted; a repeat abandons it, recording it as a
    /// transport error.
    async fn await_request<T>(
        &self,
        transport: &T,
        shutdown_rx: &mut ShutdownReceiver,
    ) -> (RequestResult, bool)
    where
        T: Transport + ?Sized,
    {
        let started = Instant::now();
        let request = issue_request(transport, self.config.endpoint_url());
        tokio::pin!(request);
        let mut interrupts: u64 = 0;
        let mut listening = true;

        loop {
            tokio::select! {
                result = &mut request => return (result, interrupts > 0),
                received = shutdown_rx.recv(), if listening => match received {
                    Ok(()) => interrupts = interrupts.saturating_add(1),
                    Err(RecvError::Lagged(skipped)) => {
                        interrupts = interrupts.saturating_add(skipped);
                    }
                    Err(RecvError::Closed) => listening = false,
                },
            }
            if interrupts >= ABANDON_AFTER_INTERRUPTS {
                debug!(interrupts, "Abandoning in-flight request");
                return (abandoned_request(started.elapsed()), true);
            }
        }
    }

    /// Waits out the pacing interval; returns `true` if shutdown arrived meanwhile.
    async fn pause(&self, shutdown_rx: &mut ShutdownReceiver) -> bool {
        let interval = self.config.interval();
        if interval.is_zero() {
            tokio::task::yield_now().await;
            return false;
        }

        let now = Instant::now();
        let deadline = now
            .checked_add(interval)
            .or_else(|| now.checked_add(MAX_PAUSE))
            .unwrap_or(now);
        tokio::select! {
            () = sleep_until(deadline) => false,
            received = shutdown_rx.recv() => match received {
                Ok(()) | Err(RecvError::Lagged(_)) => true,
                Err(RecvError::Closed) => {
                    sleep_until(deadline).await;
                    false
                }
            },
        }
    }
}

fn shutdown_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Ok(()) | Err(TryRecvError::Lagged(_)) => true,
        Err(TryRecvError::Empty | TryRecvError::Closed) => false,
    }
}
