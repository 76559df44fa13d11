use std::time::Duration;

use chrono::Local;
use tokio::time::Instant;
use tracing::debug;

use crate::http::{RequestOutcome, RequestResult, ResponseBody, Transport};

const ABANDONED_DESCRIPTION: &str = "request abandoned after repeated interrupt";

/// Issues one GET and classifies it. Never fails: transport errors become
/// [`RequestOutcome::TransportError`], timed up to the point of failure.
pub async fn issue_request<T>(transport: &T, url: &str) -> RequestResult
where
    T: Transport + ?Sized,
{
    let started = Instant::now();
    let response = transport.get(url).await;
    let elapsed = started.elapsed();
    let outcome = RequestOutcome::classify(response);

    match &outcome {
        RequestOutcome::Success { body } => match body {
            ResponseBody::Json(value) => debug!(%value, "Response body"),
            ResponseBody::Text(text) => debug!(body = %text, "Response body (not JSON)"),
        },
        RequestOutcome::HttpError { status, body } => {
            debug!(status, %body, "Non-200 response");
        }
        RequestOutcome::TransportError {
            description,
            timed_out,
        } => {
            debug!(timed_out, error = %description, "Request failed");
        }
    }

    RequestResult {
        timestamp: Local::now(),
        elapsed,
        outcome,
    }
}

/// Result recorded for a request given up on before it resolved.
#[must_use]
pub fn abandoned_request(elapsed: Duration) -> RequestResult {
    RequestResult {
        timestamp: Local::now(),
        elapsed,
        outcome: RequestOutcome::TransportError {
            description: ABANDONED_DESCRIPTION.to_owned(),
            timed_out: false,
        },
    }
}
