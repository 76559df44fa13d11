//! Console reporting: startup banner, per-request lines and statistics blocks.
mod console;
mod lines;


pub use console::ConsoleReporter;
pub use lines::{banner_lines, format_rate_x100, format_secs, request_line, stats_lines};

use crate::http::RequestResult;
use crate::metrics::StatsSnapshot;
use crate::tester::TesterConfig;

/// Sink for everything the request loop reports.
pub trait Reporter {
    fn run_started(&mut self, config: &TesterConfig);
    fn request_completed(&mut self, ordinal: u64, result: &RequestResult);
    fn statistics(&mut self, snapshot: &StatsSnapshot);
    fn interrupted(&mut self);
}
