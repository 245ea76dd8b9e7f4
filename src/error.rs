//! Unified error handling for slirc-client.
//!
//! Nothing here is fatal to the process: connection failures come back as
//! [`ConnectFailure`], everything else on an established session as
//! [`ClientError`].

use std::time::Duration;

use slirc_proto::ProtocolError;
use thiserror::Error;

use crate::network::{ConnectionState, Transition};

// ============================================================================
// Session Errors
// ============================================================================

/// Errors raised by an established (or expected) session.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("not connected")]
    NotConnected,

    #[error("invalid state transition: {event:?} from {from:?}")]
    InvalidTransition {
        from: ConnectionState,
        event: Transition,
    },
}

impl ClientError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Protocol(_) => "protocol",
            Self::NotConnected => "not_connected",
            Self::InvalidTransition { .. } => "invalid_transition",
        }
    }
}

// ============================================================================
// Handler Errors (dispatch)
// ============================================================================

/// Errors that can occur while handling one inbound message.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("missing parameter for {0}")]
    MissingParameter(&'static str),

    #[error("send error: {0}")]
    Send(#[from] ClientError),
}

/// Result type for message handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Connect Errors
// ============================================================================

/// Why a connect attempt failed.
#[derive(Debug, Error)]
pub enum ConnectFailureReason {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("timed out")]
    Timeout,

    #[error("connection is not idle ({0:?})")]
    NotIdle(ConnectionState),

    #[error("registration failed: {0}")]
    Handshake(#[source] ClientError),
}

/// A failed `connect()`, with the time spent before giving up.
#[derive(Debug, Error)]
#[error("failed to connect to {host}:{port} after {:.3}s: {reason}", .elapsed.as_secs_f64())]
pub struct ConnectFailure {
    pub host: String,
    pub port: u16,
    #[source]
    pub reason: ConnectFailureReason,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_failure_display() {
        let failure = ConnectFailure {
            host: "irc.example.net".to_string(),
            port: 6667,
            reason: ConnectFailureReason::Timeout,
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(
            failure.to_string(),
            "failed to connect to irc.example.net:6667 after 1.500s: timed out"
        );
    }

    #[test]
    fn test_connect_failure_source() {
        let io_err =
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let failure = ConnectFailure {
            host: "localhost".to_string(),
            port: 1,
            reason: io_err.into(),
            elapsed: Duration::ZERO,
        };
        let source = std::error::Error::source(&failure).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ClientError::NotConnected.error_code(), "not_connected");
        let err: ClientError = std::io::Error::other("boom").into();
        assert_eq!(err.error_code(), "io");
    }

    #[test]
    fn test_handler_error_from_client_error() {
        let err: HandlerError = ClientError::NotConnected.into();
        assert_eq!(err.to_string(), "send error: not connected");
    }
}
