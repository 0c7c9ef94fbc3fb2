//! UseCase layer: one struct per operation.
//!
//! - Room gateway: [`CreateRoomUseCase`], [`JoinRoomUseCase`], [`GetHistoryUseCase`]
//! - Connection lifecycle: [`ConnectParticipantUseCase`], [`DisconnectParticipantUseCase`],
//!   [`ConnectionGuard`]
//! - Fan-out: [`SendMessageUseCase`]

mod connect_participant;
mod connection_guard;
mod create_room;
mod disconnect_participant;
mod error;
mod get_history;
mod join_room;
mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use connection_guard::ConnectionGuard;
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{CreateRoomError, GetHistoryError, JoinRoomError};
pub use get_history::GetHistoryUseCase;
pub use join_room::JoinRoomUseCase;
pub use send_message::{BroadcastReport, SendMessageUseCase};
