//! # graphlink
//!
//! Client connection layer for WebSocket graph-query servers.
//!
//! The crate governs a single connection's lifecycle: the asynchronous
//! handshake that upgrades HTTP to WebSocket, triage of inbound frames
//! (payloads forwarded upstream, keepalive pongs consumed, anything else a
//! protocol violation), idle-triggered keepalive pings, and propagation of
//! fatal errors to both the handshake signal and the upstream consumer.
//! Request correlation, query serialization, and connection pooling belong
//! to the layers above.
//!
//! Real socket I/O requires the `full` feature; the core is unit testable
//! without a network.
//!
//! ## Example
//!
//! ```ignore
//! use graphlink::{ActiveRegistry, ConnectionConfig, Frame};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = ActiveRegistry::new();
//!     let (tx, mut rx) = mpsc::unbounded_channel();
//!     let conn = graphlink::socket::connect(
//!         "ws://localhost:8182/gremlin",
//!         ConnectionConfig::default(),
//!         registry.clone(),
//!         tx,
//!     )
//!     .await?;
//!
//!     conn.send(Frame::Text("g.V().count()".into()))?;
//!     while let Some(result) = rx.recv().await {
//!         println!("{result:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod events;
pub mod frame;
pub mod handler;
pub mod registry;
pub mod signal;
pub mod socket;
pub mod transport;

pub use config::{ConnectionConfig, IdleConfig};
pub use connection::{Connection, ConnectionId};
pub use error::{ConnectionError, Error, Result};
pub use events::{ConnectionEvent, HandshakeEvent, IdleEvent};
pub use frame::{Frame, FrameKind};
pub use handler::ConnectionHandler;
pub use registry::ActiveRegistry;
pub use signal::HandshakeSignal;
pub use transport::{FrameConsumer, FrameSink, Transport};
