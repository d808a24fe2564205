use crate::transport::{AppState, Session};
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use huddle_core::ClientMessage;
use tracing::{debug, error, info, warn};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (session, mut outbound) = match Session::open(state.router.clone()).await {
        Ok(opened) => opened,
        Err(e) => {
            error!("Refusing WebSocket connection: {}", e);
            return;
        }
    };
    let id = session.id();
    info!("New WebSocket connection: {}", id);

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = outbound.recv().await {
            let json = match msg.to_json() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize signal message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    });

    tokio::select! {
        _ = &mut send_task => {}
        _ = async {
            while let Some(frame) = receiver.next().await {
                match frame {
                    Ok(Message::Text(text)) => match ClientMessage::from_json(text.as_str()) {
                        Ok(message) => {
                            if let Err(e) = session.forward(message).await {
                                error!("Router unavailable: {}", e);
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid message from {}: {}", id, e),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        debug!("Transport error on {}: {}", id, e);
                        break;
                    }
                }
            }
        } => {}
    }

    session.close().await;
    send_task.abort();
    info!("WebSocket disconnected: {}", id);
}
