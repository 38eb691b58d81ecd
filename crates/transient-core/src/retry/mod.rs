//! Transient-fault classification and retry decisions.
//!
//! Classification maps a [`FaultError`] to an HTTP status, a transport status,
//! or neither. The policy turns that class and the caller's attempt counter
//! into a [`RetryDecision`] with a jittered, quadratically growing delay. The
//! retry loop itself belongs to the caller.

mod classify;
#[cfg(feature = "curl")]
mod curl_adapter;
mod error;
mod jitter;
mod policy;
mod should_retry;
mod status;

pub use classify::{classify, classify_http_status, is_transient, is_transient_error, FailureClass};
#[cfg(feature = "curl")]
pub use curl_adapter::{fault_for_response_code, transport_status_for_curl};
pub use error::{FaultError, RequestFailure, TransportError, TransportResponse};
pub use jitter::Jitter;
pub use policy::{RetryDecision, RetryPolicy, StopReason};
pub use should_retry::{NoRetry, ShouldRetry};
pub use status::{ParseStatusError, TransportStatus};
