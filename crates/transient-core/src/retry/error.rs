//! Fault error chain inspected by the classifier.
//!
//! Transports surface failures in layers: an aggregate may wrap a single base
//! cause, a request failure wraps the transport error that caused it, and the
//! transport error may carry the HTTP response it received. `FaultError`
//! models those layers as variants so classification walks them structurally.

use crate::retry::status::TransportStatus;
use std::fmt;
use std::io;

/// Error raised by a remote call, as seen by the retry policy.
#[derive(Debug)]
pub enum FaultError {
    /// Composite of causes. With exactly one cause it is transparent to classification.
    Aggregate(Vec<FaultError>),
    /// Request-level failure, optionally wrapping the error that caused it.
    Request(RequestFailure),
    /// Transport-level failure not wrapped in a request failure.
    Transport(TransportError),
    /// Local input/output fault with no HTTP or transport semantics.
    Io(io::Error),
    /// Anything else.
    Other(String),
}

/// Request-level failure wrapper.
#[derive(Debug)]
pub struct RequestFailure {
    pub message: String,
    pub cause: Option<Box<FaultError>>,
}

/// Transport-level failure with its status and, if one arrived, the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub status: TransportStatus,
    pub response: Option<TransportResponse>,
    pub message: String,
}

/// Response attached to a transport error. Non-HTTP responses have no status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportResponse {
    pub status_code: Option<u16>,
}

impl TransportError {
    pub fn new(status: TransportStatus) -> Self {
        Self {
            status,
            response: None,
            message: status.to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_response(mut self, response: TransportResponse) -> Self {
        self.response = Some(response);
        self
    }

    /// Transport error carrying an HTTP response with `code`.
    pub fn http(code: u16) -> Self {
        Self {
            status: TransportStatus::ProtocolError,
            response: Some(TransportResponse {
                status_code: Some(code),
            }),
            message: format!("HTTP {}", code),
        }
    }
}

impl FaultError {
    /// Request failure wrapping `cause`.
    pub fn request(message: impl Into<String>, cause: FaultError) -> Self {
        FaultError::Request(RequestFailure {
            message: message.into(),
            cause: Some(Box::new(cause)),
        })
    }

    /// Request failure wrapping a transport error.
    pub fn transport(error: TransportError) -> Self {
        Self::request(error.message.clone(), FaultError::Transport(error))
    }

    /// Request failure wrapping a transport error that received an HTTP response.
    pub fn http(code: u16) -> Self {
        Self::transport(TransportError::http(code))
    }

    pub fn aggregate(causes: Vec<FaultError>) -> Self {
        FaultError::Aggregate(causes)
    }

    pub fn other(message: impl Into<String>) -> Self {
        FaultError::Other(message.into())
    }

    /// Base cause: descends through aggregates holding exactly one cause.
    ///
    /// Idempotent; non-aggregates and multi-cause aggregates return themselves.
    pub fn base(&self) -> &FaultError {
        let mut current = self;
        while let FaultError::Aggregate(causes) = current {
            match causes.as_slice() {
                [only] => current = only,
                _ => break,
            }
        }
        current
    }

    /// Transport error reached via request failure -> transport error.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self.base() {
            FaultError::Request(RequestFailure {
                cause: Some(cause), ..
            }) => match cause.as_ref() {
                FaultError::Transport(t) => Some(t),
                _ => None,
            },
            _ => None,
        }
    }

    /// HTTP status reached via request failure -> transport error -> response -> code.
    pub fn http_status(&self) -> Option<u16> {
        self.transport_error()
            .and_then(|t| t.response)
            .and_then(|r| r.status_code)
    }

    /// Transport status reached via request failure -> transport error.
    pub fn transport_status(&self) -> Option<TransportStatus> {
        self.transport_error().map(|t| t.status)
    }

    /// True when the base cause is a local I/O fault.
    pub fn is_io(&self) -> bool {
        matches!(self.base(), FaultError::Io(_))
    }
}

impl fmt::Display for FaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultError::Aggregate(causes) => match causes.as_slice() {
                [only] => write!(f, "{}", only),
                _ => write!(f, "{} errors occurred", causes.len()),
            },
            FaultError::Request(r) => write!(f, "request failed: {}", r.message),
            FaultError::Transport(t) => write!(f, "transport: {}", t.message),
            FaultError::Io(e) => write!(f, "io: {}", e),
            FaultError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl std::error::Error for TransportError {}

impl std::error::Error for FaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FaultError::Aggregate(causes) => causes
                .first()
                .map(|c| c as &(dyn std::error::Error + 'static)),
            FaultError::Request(r) => r
                .cause
                .as_deref()
                .map(|c| c as &(dyn std::error::Error + 'static)),
            FaultError::Transport(t) => Some(t),
            FaultError::Io(e) => Some(e),
            FaultError::Other(_) => None,
        }
    }
}

impl From<io::Error> for FaultError {
    fn from(e: io::Error) -> Self {
        FaultError::Io(e)
    }
}

impl From<TransportError> for FaultError {
    fn from(e: TransportError) -> Self {
        FaultError::transport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn base_unwraps_nested_single_cause_aggregates() {
        let err = FaultError::aggregate(vec![FaultError::aggregate(vec![FaultError::other(
            "boom",
        )])]);
        assert!(matches!(err.base(), FaultError::Other(m) if m == "boom"));
        // Unwrapping the base again is a no-op.
        assert!(std::ptr::eq(err.base(), err.base().base()));
    }

    #[test]
    fn base_keeps_multi_cause_aggregate() {
        let err = FaultError::aggregate(vec![FaultError::other("a"), FaultError::other("b")]);
        assert!(matches!(err.base(), FaultError::Aggregate(c) if c.len() == 2));
        let empty = FaultError::aggregate(Vec::new());
        assert!(matches!(empty.base(), FaultError::Aggregate(c) if c.is_empty()));
    }

    #[test]
    fn http_status_follows_full_chain() {
        assert_eq!(FaultError::http(503).http_status(), Some(503));
        assert_eq!(
            FaultError::http(503).transport_status(),
            Some(TransportStatus::ProtocolError)
        );
    }

    #[test]
    fn http_status_absent_without_response_code() {
        let t = TransportError::new(TransportStatus::ProtocolError)
            .with_response(TransportResponse { status_code: None });
        let err = FaultError::transport(t);
        assert_eq!(err.http_status(), None);
        assert_eq!(err.transport_status(), Some(TransportStatus::ProtocolError));
    }

    #[test]
    fn bare_transport_error_is_not_reachable_without_request_wrapper() {
        let err = FaultError::Transport(TransportError::http(500));
        assert_eq!(err.http_status(), None);
        assert_eq!(err.transport_status(), None);
    }

    #[test]
    fn request_wrapping_non_transport_cause_has_no_status() {
        let err = FaultError::request("bad", FaultError::other("inner"));
        assert_eq!(err.transport_status(), None);
        let bare = FaultError::Request(RequestFailure {
            message: "no cause".to_string(),
            cause: None,
        });
        assert_eq!(bare.transport_status(), None);
    }

    #[test]
    fn io_error_converts_and_is_detected_through_aggregate() {
        let io = io::Error::new(io::ErrorKind::BrokenPipe, "pipe");
        let err = FaultError::aggregate(vec![FaultError::from(io)]);
        assert!(err.is_io());
        assert!(!FaultError::other("x").is_io());
    }

    #[test]
    fn source_chain_reaches_transport_error() {
        let err = FaultError::http(502);
        let transport = err.source().expect("request has a cause");
        assert!(transport.to_string().contains("HTTP 502"));
        assert!(transport.source().is_some());
    }

    #[test]
    fn display_renders_single_aggregate_as_its_cause() {
        let err = FaultError::aggregate(vec![FaultError::other("inner")]);
        assert_eq!(err.to_string(), "inner");
        assert_eq!(FaultError::http(404).to_string(), "request failed: HTTP 404");
    }
}
