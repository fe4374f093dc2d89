//! Shared error type across deskmate crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, LinkError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum LinkError {
    /// An operation required an open connection and there was none.
    #[error("not connected")]
    NotConnected,
    /// The connection handshake could not complete.
    #[error("connect failed: {0}")]
    Connect(String),
    /// The socket failed while the connection was nominally open.
    #[error("transport error: {0}")]
    Transport(String),
    /// An inbound message could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
    /// An outbound payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),
    /// Configuration was missing, malformed, or out of range.
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl LinkError {
    /// Whether the error means the connection is unusable and the caller
    /// must reconnect before retrying.
    pub fn is_connection_fault(&self) -> bool {
        matches!(
            self,
            LinkError::NotConnected | LinkError::Connect(_) | LinkError::Transport(_)
        )
    }
}
