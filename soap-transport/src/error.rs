//! Error type shared by all transport implementations.

use thiserror::Error;

/// Unified error raised by transport operations.
///
/// Every HTTP-layer failure is translated into this one type at the transport
/// boundary. `status` carries the HTTP status code when a response was
/// received, or `0` when the failure happened before any response existed
/// (connection refused, DNS failure, timeout). `body` holds the raw response
/// body and is present only alongside a nonzero status.
///
/// Callers branch on `status` to tell network-level failures from HTTP-level
/// ones.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description, including a captured backtrace for
    /// diagnostics.
    pub message: String,
    /// HTTP status code, or `0` when no response was received.
    pub status: u16,
    /// Raw response body, present only when a response was received.
    pub body: Option<Vec<u8>>,
}

impl TransportError {
    /// Error for a response received with a failure status.
    pub fn http(message: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        Self {
            message: message.into(),
            status,
            body: Some(body),
        }
    }

    /// Error for a failure before any response was received.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 0,
            body: None,
        }
    }

    /// True when the failure happened before any response was received.
    pub fn is_network_error(&self) -> bool {
        self.status == 0
    }
}
