//! Connection lifecycle handler: handshake signalling, frame triage, and
//! idle-triggered keepalive for one connection.
//!
//! The transport collaborator feeds [`ConnectionHandler::dispatch`] one
//! event at a time per connection, in arrival order. Payload frames go
//! upstream untouched, pongs are consumed, handshake progress resolves the
//! connection's signal, idle firings emit keepalive pings, and every fatal
//! error is forwarded to the upstream consumer after failing a still
//! pending handshake.

use crate::connection::Connection;
use crate::error::ConnectionError;
use crate::events::{ConnectionEvent, HandshakeEvent, IdleEvent};
use crate::frame::Frame;
use crate::registry::ActiveRegistry;
use crate::signal::HandshakeSignal;
use crate::transport::FrameConsumer;
use std::sync::Arc;

/// Per-connection event handler.
pub struct ConnectionHandler<C: FrameConsumer> {
    connection: Arc<Connection>,
    registry: ActiveRegistry,
    consumer: C,
}

impl<C: FrameConsumer> ConnectionHandler<C> {
    /// Attach to a connection. The connection's handshake signal must still
    /// be pending; no frames may arrive before this returns.
    pub fn new(connection: Arc<Connection>, registry: ActiveRegistry, consumer: C) -> Self {
        Self {
            connection,
            registry,
            consumer,
        }
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.connection
    }

    /// Handle to the handshake outcome, for callers that wait on readiness.
    pub fn handshake(&self) -> HandshakeSignal {
        self.connection.handshake().clone()
    }

    /// Process one event. The transport must call this from a single task
    /// per connection; no two events for the same connection run at once.
    pub fn dispatch(&mut self, event: ConnectionEvent) {
        match event {
            ConnectionEvent::Frame(frame) => self.on_frame(frame),
            ConnectionEvent::Handshake(event) => self.on_handshake(event),
            ConnectionEvent::Idle(event) => self.on_idle(event),
            ConnectionEvent::Fault(cause) => self.on_fault(cause),
        }
    }

    fn on_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Text(_) | Frame::Binary(_) => self.consumer.on_frame(frame),
            Frame::Pong(_) => {
                tracing::debug!(connection = %self.connection, "received response to keepalive ping");
            }
            other => self.on_fault(ConnectionError::ProtocolViolation { kind: other.kind() }),
        }
    }

    fn on_handshake(&mut self, event: HandshakeEvent) {
        match event {
            HandshakeEvent::Completed => {
                // Only the first resolution registers the connection; a
                // late Completed after a fault must not mark it active.
                if self.connection.handshake().succeed() {
                    self.registry.insert(Arc::clone(&self.connection));
                }
            }
            HandshakeEvent::TimedOut => {
                self.on_fault(ConnectionError::HandshakeTimeout {
                    address: self.connection.address().to_string(),
                });
            }
        }
    }

    fn on_idle(&mut self, event: IdleEvent) {
        match event {
            IdleEvent::ReaderIdle => {
                tracing::warn!(connection = %self.connection, "no inbound traffic within the reader-idle window");
            }
            IdleEvent::WriterIdle | IdleEvent::AllIdle => {
                tracing::info!(connection = %self.connection, "sending keepalive ping");
                if let Err(cause) = self.connection.send(Frame::ping()) {
                    self.on_fault(cause);
                }
            }
        }
    }

    /// Fatal error path. Fails a still pending handshake with the cause so
    /// blocked callers unblock, then propagates upstream unconditionally.
    /// Teardown and registry cleanup stay with the upstream consumer; doing
    /// them here as well would race its close path.
    fn on_fault(&mut self, cause: ConnectionError) {
        self.connection.handshake().fail(cause.clone());
        self.consumer.on_error(cause);
    }
}
