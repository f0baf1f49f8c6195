//! WebSocket frames as seen by the connection layer.
//!
//! Bit-level encoding/decoding belongs to the socket transport; everything
//! above it works with this decoded form.

use bytes::Bytes;
use std::fmt;

/// One decoded WebSocket frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 payload (serialized request or response).
    Text(String),
    /// Binary payload.
    Binary(Bytes),
    /// Keepalive probe.
    Ping(Bytes),
    /// Keepalive acknowledgment.
    Pong(Bytes),
    /// Close control frame.
    Close,
}

impl Frame {
    /// An empty keepalive probe.
    pub fn ping() -> Self {
        Frame::Ping(Bytes::new())
    }

    pub fn kind(&self) -> FrameKind {
        match self {
            Frame::Text(_) => FrameKind::Text,
            Frame::Binary(_) => FrameKind::Binary,
            Frame::Ping(_) => FrameKind::Ping,
            Frame::Pong(_) => FrameKind::Pong,
            Frame::Close => FrameKind::Close,
        }
    }
}

/// Frame discriminant, used in diagnostics and protocol-violation errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Text,
    Binary,
    Ping,
    Pong,
    Close,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FrameKind::Text => "text",
            FrameKind::Binary => "binary",
            FrameKind::Ping => "ping",
            FrameKind::Pong => "pong",
            FrameKind::Close => "close",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Frame::Text("x".into()).kind(), FrameKind::Text);
        assert_eq!(Frame::Binary(Bytes::from_static(b"x")).kind(), FrameKind::Binary);
        assert_eq!(Frame::ping().kind(), FrameKind::Ping);
        assert_eq!(Frame::Pong(Bytes::new()).kind(), FrameKind::Pong);
        assert_eq!(Frame::Close.kind(), FrameKind::Close);
    }

    #[test]
    fn kind_display_is_wire_name() {
        assert_eq!(FrameKind::Pong.to_string(), "pong");
        assert_eq!(FrameKind::Close.to_string(), "close");
    }
}
