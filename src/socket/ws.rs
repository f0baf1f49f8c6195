//! WebSocket connector and per-connection driver task (requires `full`
//! feature).
//!
//! One task per connection owns both stream halves and the idle timer, and
//! feeds the lifecycle handler events strictly in arrival order.

use super::timer::IdleTimer;
use crate::config::ConnectionConfig;
use crate::connection::Connection;
use crate::error::{ConnectionError, Result};
use crate::events::{ConnectionEvent, HandshakeEvent};
use crate::frame::Frame;
use crate::handler::ConnectionHandler;
use crate::registry::ActiveRegistry;
use crate::transport::FrameConsumer;
use bytes::Bytes;
use futures::sink::SinkExt;
use futures::stream::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, timeout};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Open a WebSocket connection to `url` and attach the lifecycle handler.
///
/// Spawns the per-connection driver task, then waits for the handshake
/// signal to resolve: on success the connection is registered in
/// `registry` and returned; on timeout or transport failure the recorded
/// cause is propagated. Either way the upstream `consumer` receives every
/// forwarded payload frame and every fatal error for the life of the
/// connection.
pub async fn connect<C>(
    url: &str,
    config: ConnectionConfig,
    registry: ActiveRegistry,
    consumer: C,
) -> Result<Arc<Connection>>
where
    C: FrameConsumer + 'static,
{
    let (out_tx, out_rx) = mpsc::unbounded_channel::<Frame>();
    let connection = Arc::new(Connection::new(url, Arc::new(out_tx), config.idle.clone()));
    let mut handler = ConnectionHandler::new(Arc::clone(&connection), registry, consumer);
    let signal = handler.handshake();

    let target = url.to_string();
    let deadline = config.handshake_timeout;
    tokio::spawn(async move {
        match timeout(deadline, connect_async(target.as_str())).await {
            Err(_) => handler.dispatch(ConnectionEvent::Handshake(HandshakeEvent::TimedOut)),
            Ok(Err(e)) => {
                handler.dispatch(ConnectionEvent::Fault(ConnectionError::WebSocket(
                    e.to_string(),
                )));
            }
            Ok(Ok((stream, _response))) => {
                handler.dispatch(ConnectionEvent::Handshake(HandshakeEvent::Completed));
                drive(stream, out_rx, handler).await;
            }
        }
    });

    signal.wait_ready().await?;
    Ok(connection)
}

/// Event loop for one established connection: inbound frames, the outbound
/// queue, and idle deadlines, multiplexed into ordered handler dispatches.
async fn drive<C: FrameConsumer>(
    stream: WsStream,
    mut out_rx: mpsc::UnboundedReceiver<Frame>,
    mut handler: ConnectionHandler<C>,
) {
    let mut timer = IdleTimer::new(handler.connection().idle_config());
    let (mut sink, mut stream) = stream.split();
    loop {
        tokio::select! {
            inbound = stream.next() => match inbound {
                Some(Ok(message)) => {
                    timer.touch_read();
                    match map_inbound(message) {
                        Inbound::Frame(frame) => {
                            handler.dispatch(ConnectionEvent::Frame(frame));
                        }
                        Inbound::Closed => {
                            handler.dispatch(ConnectionEvent::Fault(ConnectionError::Disconnected));
                            break;
                        }
                        Inbound::Ignore => {}
                    }
                }
                Some(Err(e)) => {
                    handler.dispatch(ConnectionEvent::Fault(ConnectionError::WebSocket(e.to_string())));
                    break;
                }
                None => {
                    handler.dispatch(ConnectionEvent::Fault(ConnectionError::Disconnected));
                    break;
                }
            },
            outbound = out_rx.recv() => match outbound {
                Some(frame) => {
                    timer.touch_write();
                    if let Err(e) = sink.send(map_outbound(frame)).await {
                        handler.dispatch(ConnectionEvent::Fault(ConnectionError::WebSocket(e.to_string())));
                        break;
                    }
                }
                // every sender dropped: the owner abandoned the connection
                None => break,
            },
            _ = sleep_until(timer.next_deadline()) => {
                for event in timer.expired() {
                    handler.dispatch(ConnectionEvent::Idle(event));
                }
            }
        }
    }
}

enum Inbound {
    Frame(Frame),
    Closed,
    Ignore,
}

fn map_inbound(message: Message) -> Inbound {
    match message {
        Message::Text(text) => Inbound::Frame(Frame::Text(text)),
        Message::Binary(data) => Inbound::Frame(Frame::Binary(Bytes::from(data))),
        Message::Pong(data) => Inbound::Frame(Frame::Pong(Bytes::from(data))),
        // tungstenite queues the pong reply itself; nothing for the handler
        Message::Ping(_) => Inbound::Ignore,
        Message::Close(_) => Inbound::Closed,
        Message::Frame(_) => Inbound::Ignore,
    }
}

fn map_outbound(frame: Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text),
        Frame::Binary(data) => Message::Binary(data.to_vec()),
        Frame::Ping(data) => Message::Ping(data.to_vec()),
        Frame::Pong(data) => Message::Pong(data.to_vec()),
        Frame::Close => Message::Close(None),
    }
}
