//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::Connection, infrastructure::dto::websocket::ClientEvent, ui::state::AppState,
};

use super::event::dispatch_event;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: messages addressed to this connection
/// (via rx channel) are sent to its WebSocket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Reads frames from this connection and dispatches them one at a time, in order.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: &AppState,
    connection: &mut Connection,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error on '{}': {}", connection.id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => match ClientEvent::parse(&text) {
                Ok(event) => dispatch_event(state, connection, event).await,
                Err(e) => {
                    tracing::warn!("Dropping frame from '{}': {}", connection.id, e);
                }
            },
            Message::Ping(_) => {
                tracing::debug!("Received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Client '{}' requested close", connection.id);
                break;
            }
            _ => {}
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this connection to receive messages
    let (tx, rx) = mpsc::unbounded_channel();
    let mut connection = state.connect_usecase.execute(tx).await;
    tracing::info!("User connected: {}", connection.id);

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    // If either side completes, stop the other
    tokio::select! {
        _ = receive_loop(receiver, &state, &mut connection) => send_task.abort(),
        _ = &mut send_task => {},
    };

    match state.disconnect_usecase.execute(&connection).await {
        Ok(departure) => {
            tracing::debug!(
                "'{}' left, {} participant(s) remain{}",
                connection.id,
                departure.remaining.len(),
                if departure.room_closed { ", room closed" } else { "" }
            );
        }
        Err(e) => tracing::debug!("No room cleanup for '{}': {}", connection.id, e),
    }
    tracing::info!("User disconnected: {}", connection.id);
}
