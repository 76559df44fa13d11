use std::time::Duration;

use reqwest::Client;

use crate::args::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT, TesterArgs};
use crate::error::HttpError;

/// Settings for the single client shared by every request of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ClientSettings {
    #[must_use]
    pub fn from_args(args: &TesterArgs) -> Self {
        Self {
            request_timeout: args.request_timeout,
            connect_timeout: args.connect_timeout,
            ..Self::default()
        }
    }
}

/// Builds the HTTP client backing a run.
///
/// # Errors
///
/// Returns an error when the underlying TLS/connection pool cannot be created.
pub fn build_client(settings: &ClientSettings) -> Result<Client, HttpError> {
    Client::builder()
        .timeout(settings.request_timeout)
        .connect_timeout(settings.connect_timeout)
        .user_agent(settings.user_agent.as_str())
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}
