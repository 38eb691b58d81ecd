//! Map curl transfer errors onto transport statuses.

use crate::retry::error::{FaultError, TransportError};
use crate::retry::status::TransportStatus;

/// Transport status for a curl error.
pub fn transport_status_for_curl(e: &curl::Error) -> TransportStatus {
    if e.is_operation_timedout() {
        return TransportStatus::Timeout;
    }
    if e.is_couldnt_connect() {
        return TransportStatus::ConnectFailure;
    }
    if e.is_couldnt_resolve_host() {
        return TransportStatus::NameResolutionFailure;
    }
    if e.is_couldnt_resolve_proxy() {
        return TransportStatus::ProxyNameResolutionFailure;
    }
    if e.is_recv_error() || e.is_read_error() {
        return TransportStatus::ReceiveFailure;
    }
    if e.is_send_error() {
        return TransportStatus::SendFailure;
    }
    if e.is_got_nothing() || e.is_partial_file() {
        return TransportStatus::ConnectionClosed;
    }
    if e.is_ssl_connect_error() {
        return TransportStatus::SecureChannelFailure;
    }
    if e.is_peer_failed_verification() || e.is_ssl_certproblem() {
        return TransportStatus::TrustFailure;
    }
    if e.is_http2_error() || e.is_http2_stream_error() {
        return TransportStatus::ServerProtocolViolation;
    }
    if e.is_aborted_by_callback() {
        return TransportStatus::RequestCanceled;
    }
    if e.is_filesize_exceeded() {
        return TransportStatus::MessageLengthLimitExceeded;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return TransportStatus::MalformedRequest;
    }
    TransportStatus::Unknown
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        TransportError::new(transport_status_for_curl(&e)).with_message(e.to_string())
    }
}

impl From<curl::Error> for FaultError {
    fn from(e: curl::Error) -> Self {
        FaultError::transport(TransportError::from(e))
    }
}

/// Fault for a completed transfer whose response code was not 2xx.
pub fn fault_for_response_code(code: u32) -> FaultError {
    match u16::try_from(code) {
        Ok(code) => FaultError::http(code),
        Err(_) => FaultError::transport(
            TransportError::new(TransportStatus::ServerProtocolViolation)
                .with_message(format!("invalid response code {}", code)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::classify::{classify, is_transient_error, FailureClass};

    #[test]
    fn timeouts_and_connection_errors_are_transient() {
        // CURLE_OPERATION_TIMEDOUT, CURLE_COULDNT_CONNECT, CURLE_GOT_NOTHING
        for code in [28, 7, 52] {
            let err = FaultError::from(curl::Error::new(code));
            assert!(is_transient_error(&err), "curl code {code}");
        }
    }

    #[test]
    fn resolution_and_malformed_url_are_permanent() {
        assert_eq!(
            transport_status_for_curl(&curl::Error::new(6)),
            TransportStatus::NameResolutionFailure
        );
        assert_eq!(
            transport_status_for_curl(&curl::Error::new(3)),
            TransportStatus::MalformedRequest
        );
        assert!(!is_transient_error(&FaultError::from(curl::Error::new(3))));
    }

    #[test]
    fn response_code_becomes_http_status() {
        assert_eq!(
            classify(&fault_for_response_code(503)),
            FailureClass::HttpStatus(503)
        );
        assert_eq!(
            classify(&fault_for_response_code(70_000)),
            FailureClass::TransportStatus(TransportStatus::ServerProtocolViolation)
        );
    }
}
