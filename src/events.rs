//! Lifecycle events dispatched into the connection handler.

use crate::error::ConnectionError;
use crate::frame::Frame;

/// Progress of the protocol upgrade on one connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeEvent {
    /// The HTTP connection was upgraded to a WebSocket.
    Completed,
    /// The upgrade did not finish within the configured deadline.
    TimedOut,
}

/// Idle-timer notification: which direction saw no traffic within its
/// configured window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleEvent {
    ReaderIdle,
    WriterIdle,
    AllIdle,
}

/// Everything the transport can feed the lifecycle handler.
///
/// The transport delivers these strictly in arrival order, one at a time
/// per connection.
#[derive(Clone, Debug)]
pub enum ConnectionEvent {
    /// A decoded inbound frame.
    Frame(Frame),
    /// Handshake progress.
    Handshake(HandshakeEvent),
    /// Idle-timer firing.
    Idle(IdleEvent),
    /// A fatal error surfaced from anywhere in the pipeline.
    Fault(ConnectionError),
}
