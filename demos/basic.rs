//! Basic example: connect to a graph server, send a traversal, and print
//! whatever comes back.
//!
//! Run with: `cargo run --example basic --features full`

use graphlink::{ActiveRegistry, ConnectionConfig, Frame};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ws://localhost:8182/gremlin".to_string());

    let registry = ActiveRegistry::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    println!("Connecting to {url}...");
    let conn = graphlink::socket::connect(&url, ConnectionConfig::default(), registry.clone(), tx)
        .await?;
    println!("Connected ({} active connection(s)).", registry.len());

    conn.send(Frame::Text("g.V().count()".into()))?;

    while let Some(result) = rx.recv().await {
        match result {
            Ok(Frame::Text(text)) => println!("[text] {text}"),
            Ok(Frame::Binary(data)) => println!("[binary] {} bytes", data.len()),
            Ok(other) => println!("[frame] {:?}", other.kind()),
            Err(e) => {
                eprintln!("[error] {e}");
                registry.remove(conn.id());
                break;
            }
        }
    }

    Ok(())
}
