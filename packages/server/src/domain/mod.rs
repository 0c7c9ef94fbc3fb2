//! Domain layer: value objects, entities, errors, and the interfaces the
//! relay needs from its collaborators.
//!
//! Nothing in here knows about axum, SQLite, or files. Concrete
//! implementations of [`RoomStore`], [`HistoryStore`], [`ArchiveStore`] and
//! [`ConnectionRegistry`] live in the infrastructure layer.

pub mod entity;
pub mod error;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Connection, ConnectionState, HistoryRecord, Participant};
pub use error::{PushError, StoreError, ValueObjectError};
pub use registry::{
    ConnectionRegistry, OUTBOUND_QUEUE_CAPACITY, OutboundChannel, OutboundReceiver,
};
pub use repository::{ArchiveStore, HistoryStore, RoomStore};
pub use value_object::{ConnectionId, MessageContent, Nickname, RoomId, RoomPassword};
