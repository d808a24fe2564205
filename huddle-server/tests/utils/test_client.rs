use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use huddle_core::{ClientMessage, ConnectionId, RoomId, ServerMessage};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::signal_helpers::{SIGNAL_TIMEOUT_MS, SILENCE_WINDOW_MS};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Browser stand-in speaking the JSON protocol over a real WebSocket.
pub struct TestClient {
    /// Id the server assigned in its welcome message.
    pub id: ConnectionId,
    ws: WsStream,
}

impl TestClient {
    /// Connect to `/ws` and wait for the welcome message.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (ws, _) = connect_async(format!("ws://{addr}/ws"))
            .await
            .context("Failed to open WebSocket")?;

        let mut client = Self {
            id: ConnectionId::new(),
            ws,
        };
        match client.recv().await? {
            ServerMessage::Welcome { id } => client.id = id,
            other => anyhow::bail!("Expected welcome, got {:?}", other),
        }
        Ok(client)
    }

    pub async fn send(&mut self, msg: &ClientMessage) -> Result<()> {
        self.send_raw(&msg.to_json()?).await
    }

    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.ws
            .send(Message::text(text.to_owned()))
            .await
            .context("Failed to send frame")
    }

    pub async fn join(&mut self, room: &str) -> Result<()> {
        self.send(&ClientMessage::JoinRoom(RoomId::from(room))).await
    }

    /// Next server message, skipping control frames.
    pub async fn recv(&mut self) -> Result<ServerMessage> {
        let deadline = Duration::from_millis(SIGNAL_TIMEOUT_MS);
        loop {
            let frame = tokio::time::timeout(deadline, self.ws.next())
                .await
                .context("Timeout waiting for server message")?
                .context("WebSocket closed")??;

            match frame {
                Message::Text(text) => return Ok(ServerMessage::from_json(text.as_str())?),
                Message::Close(_) => anyhow::bail!("Server closed the WebSocket"),
                _ => continue,
            }
        }
    }

    /// `true` if no server message arrives within the silence window.
    pub async fn is_silent(&mut self) -> bool {
        tokio::time::timeout(Duration::from_millis(SILENCE_WINDOW_MS), self.recv())
            .await
            .is_err()
    }

    pub async fn close(mut self) -> Result<()> {
        self.ws.close(None).await.context("Failed to close WebSocket")
    }
}
