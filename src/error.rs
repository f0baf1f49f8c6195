use crate::frame::FrameKind;
use thiserror::Error;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the driver.
#[derive(Error, Debug)]
pub enum Error {
    #[error("connection: {0}")]
    Connection(#[from] ConnectionError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Connection-related errors.
///
/// Cloneable so a single fault can both fail the handshake signal and
/// travel to the upstream error consumer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("websocket: {0}")]
    WebSocket(String),

    #[error("timed out while performing websocket handshake with {address} - ensure that client protocol matches server")]
    HandshakeTimeout { address: String },

    #[error("unexpected {kind} frame received")]
    ProtocolViolation { kind: FrameKind },

    #[error("transport fault: {0}")]
    Transport(String),

    #[error("timeout")]
    Timeout,

    #[error("disconnected")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handshake_timeout_names_target() {
        let err = ConnectionError::HandshakeTimeout {
            address: "ws://db:8182/gremlin".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ws://db:8182/gremlin"));
        assert!(msg.contains("handshake"));
    }

    #[test]
    fn protocol_violation_names_frame_kind() {
        let err = ConnectionError::ProtocolViolation {
            kind: FrameKind::Close,
        };
        assert_eq!(err.to_string(), "unexpected close frame received");
    }
}
