use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("apiping/", env!("CARGO_PKG_VERSION"));

/// Upper bound for a single request, so a hung endpoint cannot stall the loop forever.
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
