use std::time::Duration;

/// Path appended to the base URL for every request.
pub const ENDPOINT_PATH: &str = "/api/jokes/whatever";

/// Immutable run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TesterConfig {
    base_url: String,
    endpoint_url: String,
    interval: Duration,
    max_requests: Option<u64>,
}

impl TesterConfig {
    /// Strips surrounding whitespace and trailing slashes from the base URL.
    ///
    /// The URL is not validated here: a malformed one fails on the wire and
    /// is recorded as an errored request like any other transport failure.
    #[must_use]
    pub fn new(base_url: &str, interval: Duration, max_requests: Option<u64>) -> Self {
        let base_url = base_url.trim().trim_end_matches('/');
        Self {
            base_url: base_url.to_owned(),
            endpoint_url: format!("{}{}", base_url, ENDPOINT_PATH),
            interval,
            max_requests,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn max_requests(&self) -> Option<u64> {
        self.max_requests
    }

    /// Whether the cap still permits a request after `issued` have been sent.
    #[must_use]
    pub fn allows_another(&self, issued: u64) -> bool {
        self.max_requests.is_none_or(|cap| issued < cap)
    }
}
