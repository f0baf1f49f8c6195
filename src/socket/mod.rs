//! Real WebSocket transport (requires `full` feature).
//!
//! Owns the socket I/O and timing collaborators around the lifecycle
//! handler: the tokio-tungstenite stream, the outbound frame queue, and
//! the idle timer that drives keepalive.

#[cfg(feature = "full")]
mod timer;
#[cfg(feature = "full")]
mod ws;

#[cfg(feature = "full")]
pub use ws::connect;
