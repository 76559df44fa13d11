use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{TesterArgs, interval_from_secs};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values passed explicitly on the command line always win over the file.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "interval")
        && let Some(secs) = config.interval
    {
        args.interval = interval_from_secs(secs).ok_or_else(|| {
            invalid_field(
                "interval",
                ValidationError::IntervalOutOfRange {
                    value: secs.to_string(),
                },
            )
        })?;
    }

    if !is_cli(matches, "num_requests")
        && let Some(count) = config.num_requests
    {
        args.num_requests = Some(count);
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = timeout
            .to_duration()
            .map_err(|err| invalid_field("timeout", err))?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = timeout
            .to_duration()
            .map_err(|err| invalid_field("connect_timeout", err))?;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && matches.value_source("no_color") != Some(ValueSource::EnvVariable)
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn invalid_field(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
