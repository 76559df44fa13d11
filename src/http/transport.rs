use std::error::Error as _;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::error::HttpError;

use super::client::{ClientSettings, build_client};

/// Status line and fully read body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// A request that never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct TransportFailure {
    pub description: String,
    pub timed_out: bool,
}

impl TransportFailure {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            timed_out: false,
        }
    }
}

/// Port for issuing a plain GET. At most one call is in flight per run.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportFailure>;
}

/// reqwest-backed transport session; the connection pool lives as long as this value.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Opens the transport session.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(settings: &ClientSettings) -> Result<Self, HttpError> {
        Ok(Self {
            client: build_client(settings)?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportFailure> {
        let response = self.client.get(url).send().await.map_err(failure)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(failure)?;
        Ok(TransportResponse { status, body })
    }
}

fn failure(err: reqwest::Error) -> TransportFailure {
    TransportFailure {
        timed_out: err.is_timeout(),
        description: describe_error(&err),
    }
}

/// Flattens the error chain, since reqwest's top-level message rarely names the cause.
fn describe_error(err: &reqwest::Error) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !description.contains(&cause_text) {
            description.push_str(": ");
            description.push_str(&cause_text);
        }
        source = cause.source();
    }
    description
}
