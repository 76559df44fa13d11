use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_interval_secs};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "API endpoint testing tool - issues one GET per interval and reports latency statistics."
)]
pub struct TesterArgs {
    /// Base URL of the API to test
    pub url: Option<String>,

    /// Interval between requests in seconds (fractions allowed, 0 disables pacing)
    #[arg(
        long,
        short = 'i',
        default_value = "1.0",
        value_parser = parse_interval_secs
    )]
    pub interval: Duration,

    /// Number of requests to make (default: unlimited)
    #[arg(long = "num-requests", short = 'n')]
    pub num_requests: Option<u64>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Connection timeout (supports ms/s/m/h)
    #[arg(long = "connect-timeout", default_value = "5s", value_parser = parse_duration_arg)]
    pub connect_timeout: Duration,

    /// Path to config file (TOML/JSON). Defaults to ./apiping.toml or ./apiping.json if present.
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by APIPING_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
