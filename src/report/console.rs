use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

use crate::http::RequestResult;
use crate::metrics::StatsSnapshot;
use crate::tester::TesterConfig;

use super::Reporter;
use super::lines::{banner_lines, request_line, stats_lines};

/// Writes the human-readable report to stdout.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    use_color: bool,
}

impl ConsoleReporter {
    /// Colour is only used when stdout is a terminal.
    #[must_use]
    pub fn new(no_color: bool) -> Self {
        Self {
            use_color: !no_color && std::io::stdout().is_terminal(),
        }
    }

    fn render_status(self, result: &RequestResult) -> String {
        let label = result.outcome.status_label();
        if !self.use_color {
            return label;
        }
        let color = if result.outcome.is_success() {
            Color::Green
        } else {
            Color::Red
        };
        label.with(color).to_string()
    }
}

impl Reporter for ConsoleReporter {
    fn run_started(&mut self, config: &TesterConfig) {
        for line in banner_lines(config) {
            println!("{line}");
        }
    }

    fn request_completed(&mut self, ordinal: u64, result: &RequestResult) {
        let status = self.render_status(result);
        println!("{}", request_line(ordinal, &status, result));
    }

    fn statistics(&mut self, snapshot: &StatsSnapshot) {
        for line in stats_lines(snapshot) {
            println!("{line}");
        }
    }

    fn interrupted(&mut self) {
        println!();
        println!("Test interrupted by user");
    }
}
