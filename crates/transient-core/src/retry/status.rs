//! Transport status enumerant and its transient subset.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status reported by a transport-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportStatus {
    Timeout,
    ConnectionClosed,
    ProtocolError,
    ConnectFailure,
    ReceiveFailure,
    SendFailure,
    PipelineFailure,
    SecureChannelFailure,
    ServerProtocolViolation,
    KeepAliveFailure,
    Pending,
    Unknown,
    Success,
    NameResolutionFailure,
    ProxyNameResolutionFailure,
    RequestCanceled,
    TrustFailure,
    MessageLengthLimitExceeded,
    CacheEntryNotFound,
    RequestProhibitedByCachePolicy,
    RequestProhibitedByProxy,
    /// Request could not be formed (bad URL, unsupported scheme).
    MalformedRequest,
}

impl TransportStatus {
    /// Statuses worth retrying.
    pub const TRANSIENT: [TransportStatus; 12] = [
        TransportStatus::Timeout,
        TransportStatus::ConnectionClosed,
        TransportStatus::ProtocolError,
        TransportStatus::ConnectFailure,
        TransportStatus::ReceiveFailure,
        TransportStatus::SendFailure,
        TransportStatus::PipelineFailure,
        TransportStatus::SecureChannelFailure,
        TransportStatus::ServerProtocolViolation,
        TransportStatus::KeepAliveFailure,
        TransportStatus::Pending,
        TransportStatus::Unknown,
    ];

    pub const ALL: [TransportStatus; 22] = [
        TransportStatus::Timeout,
        TransportStatus::ConnectionClosed,
        TransportStatus::ProtocolError,
        TransportStatus::ConnectFailure,
        TransportStatus::ReceiveFailure,
        TransportStatus::SendFailure,
        TransportStatus::PipelineFailure,
        TransportStatus::SecureChannelFailure,
        TransportStatus::ServerProtocolViolation,
        TransportStatus::KeepAliveFailure,
        TransportStatus::Pending,
        TransportStatus::Unknown,
        TransportStatus::Success,
        TransportStatus::NameResolutionFailure,
        TransportStatus::ProxyNameResolutionFailure,
        TransportStatus::RequestCanceled,
        TransportStatus::TrustFailure,
        TransportStatus::MessageLengthLimitExceeded,
        TransportStatus::CacheEntryNotFound,
        TransportStatus::RequestProhibitedByCachePolicy,
        TransportStatus::RequestProhibitedByProxy,
        TransportStatus::MalformedRequest,
    ];

    pub fn is_transient(self) -> bool {
        matches!(
            self,
            TransportStatus::Timeout
                | TransportStatus::ConnectionClosed
                | TransportStatus::ProtocolError
                | TransportStatus::ConnectFailure
                | TransportStatus::ReceiveFailure
                | TransportStatus::SendFailure
                | TransportStatus::PipelineFailure
                | TransportStatus::SecureChannelFailure
                | TransportStatus::ServerProtocolViolation
                | TransportStatus::KeepAliveFailure
                | TransportStatus::Pending
                | TransportStatus::Unknown
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportStatus::Timeout => "timeout",
            TransportStatus::ConnectionClosed => "connection-closed",
            TransportStatus::ProtocolError => "protocol-error",
            TransportStatus::ConnectFailure => "connect-failure",
            TransportStatus::ReceiveFailure => "receive-failure",
            TransportStatus::SendFailure => "send-failure",
            TransportStatus::PipelineFailure => "pipeline-failure",
            TransportStatus::SecureChannelFailure => "secure-channel-failure",
            TransportStatus::ServerProtocolViolation => "server-protocol-violation",
            TransportStatus::KeepAliveFailure => "keep-alive-failure",
            TransportStatus::Pending => "pending",
            TransportStatus::Unknown => "unknown",
            TransportStatus::Success => "success",
            TransportStatus::NameResolutionFailure => "name-resolution-failure",
            TransportStatus::ProxyNameResolutionFailure => "proxy-name-resolution-failure",
            TransportStatus::RequestCanceled => "request-canceled",
            TransportStatus::TrustFailure => "trust-failure",
            TransportStatus::MessageLengthLimitExceeded => "message-length-limit-exceeded",
            TransportStatus::CacheEntryNotFound => "cache-entry-not-found",
            TransportStatus::RequestProhibitedByCachePolicy => {
                "request-prohibited-by-cache-policy"
            }
            TransportStatus::RequestProhibitedByProxy => "request-prohibited-by-proxy",
            TransportStatus::MalformedRequest => "malformed-request",
        }
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Unrecognized transport status name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for TransportStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        TransportStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_list_matches_predicate() {
        for status in TransportStatus::ALL {
            assert_eq!(
                status.is_transient(),
                TransportStatus::TRANSIENT.contains(&status),
                "{status}"
            );
        }
    }

    #[test]
    fn permanent_kinds_are_not_transient() {
        assert!(!TransportStatus::Success.is_transient());
        assert!(!TransportStatus::NameResolutionFailure.is_transient());
        assert!(!TransportStatus::TrustFailure.is_transient());
        assert!(!TransportStatus::MalformedRequest.is_transient());
    }

    #[test]
    fn parse_accepts_display_names_and_snake_case() {
        for status in TransportStatus::ALL {
            assert_eq!(status.to_string().parse::<TransportStatus>(), Ok(status));
        }
        assert_eq!(
            "keep_alive_failure".parse::<TransportStatus>(),
            Ok(TransportStatus::KeepAliveFailure)
        );
        assert!("teapot".parse::<TransportStatus>().is_err());
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&TransportStatus::SecureChannelFailure).unwrap();
        assert_eq!(json, "\"secure-channel-failure\"");
    }
}
