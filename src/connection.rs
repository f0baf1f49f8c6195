//! A single logical connection to the server.

use crate::config::IdleConfig;
use crate::error::{ConnectionError, Result};
use crate::frame::Frame;
use crate::signal::HandshakeSignal;
use crate::transport::{FrameSink, Transport};
use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Registry key for a connection.
pub type ConnectionId = Uuid;

/// One bidirectional channel to the server.
///
/// The connection is owned by the pool collaborator that opened it; the
/// lifecycle layer holds `Arc` references sufficient to send frames and to
/// register the connection once its handshake succeeds.
pub struct Connection {
    id: ConnectionId,
    address: String,
    sink: Arc<dyn FrameSink>,
    idle: IdleConfig,
    handshake: HandshakeSignal,
}

impl Connection {
    /// Attach to an outbound sink. The handshake signal starts pending.
    pub fn new(address: impl Into<String>, sink: Arc<dyn FrameSink>, idle: IdleConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            address: address.into(),
            sink,
            idle,
            handshake: HandshakeSignal::new(),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Target address, used in diagnostics.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn idle_config(&self) -> &IdleConfig {
        &self.idle
    }

    /// This connection's handshake completion signal.
    pub fn handshake(&self) -> &HandshakeSignal {
        &self.handshake
    }

    /// Enqueue a frame for sending. Non-blocking; the socket task drains
    /// the queue.
    pub fn send(&self, frame: Frame) -> std::result::Result<(), ConnectionError> {
        self.sink.send_frame(frame)
    }
}

/// Byte-level seam for callers above the frame layer: payload bytes go out
/// as binary frames.
#[async_trait]
impl Transport for Connection {
    async fn send(&self, data: &[u8]) -> Result<()> {
        Connection::send(self, Frame::Binary(Bytes::copy_from_slice(data)))?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        Connection::send(self, Frame::Close)?;
        Ok(())
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("address", &self.address)
            .finish()
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn send_enqueues_on_sink() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = Connection::new("ws://db:8182/gremlin", Arc::new(tx), IdleConfig::default());
        conn.send(Frame::Text("g.V()".into())).unwrap();
        assert_eq!(rx.recv().await, Some(Frame::Text("g.V()".into())));
    }

    #[tokio::test]
    async fn send_after_sink_dropped_is_disconnected() {
        let (tx, rx) = mpsc::unbounded_channel::<Frame>();
        let conn = Connection::new("ws://db:8182/gremlin", Arc::new(tx), IdleConfig::default());
        drop(rx);
        assert_eq!(
            conn.send(Frame::ping()),
            Err(ConnectionError::Disconnected)
        );
    }

    #[tokio::test]
    async fn transport_send_emits_binary_frame() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = Connection::new("ws://db:8182/gremlin", Arc::new(tx), IdleConfig::default());
        Transport::send(&conn, b"\x81\x00query").await.unwrap();
        assert_eq!(
            rx.recv().await,
            Some(Frame::Binary(Bytes::from_static(b"\x81\x00query")))
        );
    }

    #[tokio::test]
    async fn transport_close_emits_close_frame() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = Connection::new("ws://db:8182/gremlin", Arc::new(tx), IdleConfig::default());
        Transport::close(&conn).await.unwrap();
        assert_eq!(rx.recv().await, Some(Frame::Close));
    }

    #[test]
    fn display_names_address_and_id() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let conn = Connection::new("ws://db:8182/gremlin", Arc::new(tx), IdleConfig::default());
        let shown = conn.to_string();
        assert!(shown.starts_with("ws://db:8182/gremlin ("));
    }
}
