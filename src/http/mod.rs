//! HTTP transport session and per-request outcome classification.
mod client;
mod outcome;
mod transport;


pub use client::{ClientSettings, build_client};
pub use outcome::{RequestOutcome, RequestResult, ResponseBody, STATUS_OK};
pub use transport::{ReqwestTransport, Transport, TransportFailure, TransportResponse};
