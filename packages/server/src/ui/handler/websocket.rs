//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};

use crate::{
    domain::{MessageContent, Nickname, OutboundReceiver, Participant, RoomId},
    infrastructure::dto::websocket::ChatMessage,
    ui::state::AppState,
};

use super::http::ApiError;

/// Largest inbound message or frame. A client exceeding it gets a read error
/// and its connection is closed.
pub const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

/// `GET /ws/{room_id}/{nickname}`
///
/// Path segments are validated before the upgrade. The room password is not
/// re-checked here.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path((room_id, nickname)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    // Convert String -> Domain Models
    let room_id = RoomId::try_from(room_id).inspect_err(|e| {
        tracing::warn!("Rejected WebSocket upgrade: {}", e);
    })?;
    let nickname = Nickname::try_from(nickname).inspect_err(|e| {
        tracing::warn!("Rejected WebSocket upgrade: {}", e);
    })?;

    Ok(ws
        .max_message_size(MAX_MESSAGE_BYTES)
        .max_frame_size(MAX_MESSAGE_BYTES)
        .on_upgrade(move |socket| handle_socket(socket, state, room_id, nickname)))
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    room_id: RoomId,
    nickname: Nickname,
) {
    // Registered here; deregistered by the guard on every exit path,
    // including cancellation of this future.
    let (mut guard, rx) = state
        .connect_participant_usecase
        .execute(room_id, nickname);
    let participant = guard.participant().clone();

    let (sender, receiver) = socket.split();

    // If either loop completes, the other is dropped
    tokio::select! {
        _ = receive_loop(receiver, &state, &participant) => {}
        _ = push_loop(rx, sender, &participant) => {}
    }

    guard.begin_closing();
    guard.close();
}

/// Reads frames from this client and broadcasts each text frame to the room.
async fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: &AppState,
    participant: &Participant,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error from '{}': {}", participant.id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                let content = MessageContent::from(text.as_str().to_string());

                // Domain Model から DTO への変換
                let frame = ChatMessage::new(&participant.nickname, &content);
                let payload = match serde_json::to_string(&frame) {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::error!("Failed to serialize chat frame: {}", e);
                        continue;
                    }
                };

                state
                    .send_message_usecase
                    .execute(participant, content, payload)
                    .await;
            }
            Message::Close(_) => {
                tracing::debug!("Client '{}' requested close", participant.id);
                break;
            }
            // Ping/pong is handled by the WebSocket protocol; binary frames are ignored
            _ => {}
        }
    }
}

/// Drains the outbound channel into this client's socket.
async fn push_loop(
    mut rx: OutboundReceiver,
    mut sender: SplitSink<WebSocket, Message>,
    participant: &Participant,
) {
    while let Some(payload) = rx.recv().await {
        if let Err(e) = sender.send(Message::Text(payload.into())).await {
            tracing::debug!("Failed to push to '{}': {}", participant.id, e);
            break;
        }
    }
}
