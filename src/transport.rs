//! Collaborator seams around the lifecycle handler.
//!
//! [`FrameSink`] is the outbound path (keepalive pings, caller requests);
//! [`FrameConsumer`] is the upstream path (forwarded payload frames and
//! propagated fatal errors). Both are fire-and-forget so the per-connection
//! event loop never blocks. [`Transport`] is the byte-level seam for
//! callers that treat a connection as an opaque pipe.

use crate::error::{ConnectionError, Result};
use crate::frame::Frame;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Outbound half of a connection's transport.
pub trait FrameSink: Send + Sync {
    /// Enqueue one frame for sending. Must not block the caller.
    fn send_frame(&self, frame: Frame) -> std::result::Result<(), ConnectionError>;
}

impl FrameSink for mpsc::UnboundedSender<Frame> {
    fn send_frame(&self, frame: Frame) -> std::result::Result<(), ConnectionError> {
        self.send(frame).map_err(|_| ConnectionError::Disconnected)
    }
}

/// Upstream consumer of one connection's traffic.
///
/// Receives payload frames in arrival order (ownership transfers with the
/// frame) and every fatal error. After an error the consumer owns logging,
/// connection teardown, and registry cleanup.
pub trait FrameConsumer: Send {
    fn on_frame(&mut self, frame: Frame);
    fn on_error(&mut self, error: ConnectionError);
}

/// Channel-backed consumer: frames and errors arrive as one ordered stream.
impl FrameConsumer for mpsc::UnboundedSender<std::result::Result<Frame, ConnectionError>> {
    fn on_frame(&mut self, frame: Frame) {
        let _ = self.send(Ok(frame));
    }

    fn on_error(&mut self, error: ConnectionError) {
        let _ = self.send(Err(error));
    }
}

/// Async trait for a byte transport over an established connection.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes over the transport.
    async fn send(&self, data: &[u8]) -> Result<()>;

    /// Close the transport.
    async fn close(&self) -> Result<()>;
}
