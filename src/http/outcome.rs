use std::time::Duration;

use chrono::{DateTime, Local};

use super::transport::{TransportFailure, TransportResponse};

pub const STATUS_OK: u16 = 200;

/// Label shown in place of a status code when no response arrived.
const ERROR_STATUS_LABEL: &str = "ERROR";

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    /// A 200 whose body did not parse as JSON; kept verbatim.
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success { body: ResponseBody },
    HttpError { status: u16, body: String },
    TransportError { description: String, timed_out: bool },
}

impl RequestOutcome {
    /// Only an exact 200 counts as success; every other status is an error
    /// regardless of its body.
    #[must_use]
    pub fn classify(response: Result<TransportResponse, TransportFailure>) -> Self {
        match response {
            Ok(TransportResponse { status, body }) if status == STATUS_OK => {
                let body = match serde_json::from_str(&body) {
                    Ok(value) => ResponseBody::Json(value),
                    Err(err) => {
                        tracing::debug!("Success body is not JSON ({}); keeping raw text", err);
                        ResponseBody::Text(body)
                    }
                };
                RequestOutcome::Success { body }
            }
            Ok(TransportResponse { status, body }) => RequestOutcome::HttpError { status, body },
            Err(TransportFailure {
                description,
                timed_out,
            }) => RequestOutcome::TransportError {
                description,
                timed_out,
            },
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success { .. })
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            RequestOutcome::Success { .. } => Some(STATUS_OK),
            RequestOutcome::HttpError { status, .. } => Some(*status),
            RequestOutcome::TransportError { .. } => None,
        }
    }

    #[must_use]
    pub fn status_label(&self) -> String {
        self.status()
            .map_or_else(|| ERROR_STATUS_LABEL.to_owned(), |status| status.to_string())
    }
}

/// One request as reported to the console; only `elapsed` and the
/// success/failure split outlive it.
#[derive(Debug, Clone)]
pub struct RequestResult {
    pub timestamp: DateTime<Local>,
    pub elapsed: Duration,
    pub outcome: RequestOutcome,
}
