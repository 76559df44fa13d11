mod args;
mod config;
mod entry;
mod error;
mod http;
mod metrics;
mod report;
mod shutdown;
mod shutdown_handlers;
mod system;
mod tester;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
