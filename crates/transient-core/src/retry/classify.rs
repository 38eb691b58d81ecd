//! Classify fault errors into HTTP status, transport status, or neither.

use crate::retry::error::FaultError;
use crate::retry::status::TransportStatus;
use serde::Serialize;
use std::fmt;

/// Outcome of classifying a fault error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "class", content = "value", rename_all = "kebab-case")]
pub enum FailureClass {
    HttpStatus(u16),
    TransportStatus(TransportStatus),
    Unclassified,
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::HttpStatus(code) => write!(f, "HTTP {}", code),
            FailureClass::TransportStatus(status) => write!(f, "transport {}", status),
            FailureClass::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Classify a fault error. HTTP status wins over transport status.
pub fn classify(e: &FaultError) -> FailureClass {
    if let Some(code) = e.http_status() {
        return FailureClass::HttpStatus(code);
    }
    if let Some(status) = e.transport_status() {
        return FailureClass::TransportStatus(status);
    }
    FailureClass::Unclassified
}

/// Only server errors (5xx) are worth retrying.
pub fn classify_http_status(code: u16) -> bool {
    (500..600).contains(&code)
}

/// Whether `class`, derived from `e`, names a transient fault.
///
/// Unclassified errors are transient only when they are local I/O faults.
pub fn is_transient(class: FailureClass, e: &FaultError) -> bool {
    match class {
        FailureClass::HttpStatus(code) => classify_http_status(code),
        FailureClass::TransportStatus(status) => status.is_transient(),
        FailureClass::Unclassified => e.is_io(),
    }
}

/// Classify and apply the transience rule in one step.
pub fn is_transient_error(e: &FaultError) -> bool {
    is_transient(classify(e), e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::error::{TransportError, TransportResponse};
    use std::io;

    #[test]
    fn http_5xx_transient() {
        assert!(classify_http_status(500));
        assert!(classify_http_status(503));
        assert!(classify_http_status(599));
    }

    #[test]
    fn http_other_permanent() {
        assert!(!classify_http_status(404));
        assert!(!classify_http_status(429));
        assert!(!classify_http_status(200));
        assert!(!classify_http_status(600));
    }

    #[test]
    fn http_status_preferred_over_transport_status() {
        assert_eq!(classify(&FaultError::http(404)), FailureClass::HttpStatus(404));
    }

    #[test]
    fn transport_status_when_no_response() {
        let err = FaultError::transport(TransportError::new(TransportStatus::ReceiveFailure));
        assert_eq!(
            classify(&err),
            FailureClass::TransportStatus(TransportStatus::ReceiveFailure)
        );
    }

    #[test]
    fn response_without_code_falls_back_to_transport_status() {
        let t = TransportError::new(TransportStatus::Timeout)
            .with_response(TransportResponse { status_code: None });
        assert_eq!(
            classify(&FaultError::transport(t)),
            FailureClass::TransportStatus(TransportStatus::Timeout)
        );
    }

    #[test]
    fn plain_errors_are_unclassified() {
        assert_eq!(classify(&FaultError::other("nope")), FailureClass::Unclassified);
        let io = FaultError::from(io::Error::new(io::ErrorKind::Other, "disk"));
        assert_eq!(classify(&io), FailureClass::Unclassified);
    }

    #[test]
    fn unclassified_transient_only_for_io() {
        let io = FaultError::from(io::Error::new(io::ErrorKind::TimedOut, "slow disk"));
        assert!(is_transient_error(&io));
        assert!(!is_transient_error(&FaultError::other("mystery")));
    }

    #[test]
    fn classification_is_repeatable() {
        let err = FaultError::aggregate(vec![FaultError::http(502)]);
        assert_eq!(classify(&err), classify(&err));
        assert_eq!(classify(&err), FailureClass::HttpStatus(502));
    }
}
