use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::debug;

use crate::args::TesterArgs;
use crate::config::{DEFAULT_CONFIG_FILES, apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{ClientSettings, ReqwestTransport};
use crate::report::ConsoleReporter;
use crate::shutdown::shutdown_channel;
use crate::shutdown_handlers::setup_signal_shutdown_handler;
use crate::tester::{Tester, TesterConfig};

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<Option<(TesterArgs, ArgMatches)>> {
    let mut cmd = TesterArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = TesterArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(args: TesterArgs) -> AppResult<()> {
    let Some(url) = args.url.as_deref() else {
        tracing::error!("Missing URL (pass it as an argument or set 'url' in config).");
        return Err(AppError::validation(ValidationError::MissingUrl));
    };
    let config = TesterConfig::new(url, args.interval, args.num_requests);

    // The transport session spans the whole run and is dropped on every exit path.
    let transport = ReqwestTransport::new(&ClientSettings::from_args(&args))?;

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);
    let mut reporter = ConsoleReporter::new(args.no_color);

    let outcome = Tester::new(config)
        .run(&transport, &mut reporter, &mut shutdown_rx)
        .await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        tracing::warn!("Signal handler task failed: {}", err);
    }
    debug!(
        stop_reason = ?outcome.stop_reason,
        total = outcome.state.total_requests(),
        "Exiting"
    );

    Ok(())
}
