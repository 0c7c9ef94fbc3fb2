//! Domain entities.

use tokio::sync::mpsc::error::TrySendError;

use super::{
    error::PushError,
    registry::OutboundChannel,
    value_object::{ConnectionId, MessageContent, Nickname, RoomId},
};

/// Who is on the other end of a connection.
///
/// This is the part of a [`Connection`] the handler task keeps for itself;
/// the send-capable half is owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub room_id: RoomId,
    pub nickname: Nickname,
}

impl Participant {
    pub fn new(room_id: RoomId, nickname: Nickname) -> Self {
        Self {
            id: ConnectionId::generate(),
            room_id,
            nickname,
        }
    }
}

/// A live client session registered in a room.
#[derive(Debug, Clone)]
pub struct Connection {
    participant: Participant,
    channel: OutboundChannel,
}

impl Connection {
    pub fn new(participant: Participant, channel: OutboundChannel) -> Self {
        Self {
            participant,
            channel,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.participant.id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.participant.room_id
    }

    pub fn nickname(&self) -> &Nickname {
        &self.participant.nickname
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    /// Queue a serialized frame for delivery.
    ///
    /// Never blocks. Fails when the outbound pump has gone away or when the
    /// queue is full because the client stopped reading.
    pub fn send(&self, payload: String) -> Result<(), PushError> {
        self.channel.try_send(payload).map_err(|e| match e {
            TrySendError::Full(_) => PushError::QueueFull(self.participant.id.to_string()),
            TrySendError::Closed(_) => {
                PushError::ConnectionClosed(self.participant.id.to_string())
            }
        })
    }
}

/// Connection lifecycle.
///
/// `Connecting -> Open -> Closing -> Closed`. Deregistration happens while
/// `Closing`, so reaching `Closed` means the registry no longer holds the
/// connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// A message received from a participant, on its way to the stores and the
/// other participants of the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub room_id: RoomId,
    pub nickname: Nickname,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn new(room_id: RoomId, nickname: Nickname, content: MessageContent) -> Self {
        Self {
            room_id,
            nickname,
            content,
        }
    }
}

/// Persisted projection of a [`ChatMessage`], returned in append order.
///
/// Plain strings: records written before a validation rule existed must
/// still be readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub nickname: String,
    pub content: String,
}

impl From<&ChatMessage> for HistoryRecord {
    fn from(message: &ChatMessage) -> Self {
        Self {
            nickname: message.nickname.as_str().to_string(),
            content: message.content.as_str().to_string(),
        }
    }
}
