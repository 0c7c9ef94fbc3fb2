//! Connection registry interface.
//!
//! The registry is the only shared mutable structure touched by every
//! connection handler. Implementations must make `register`, `deregister`
//! and `snapshot` on the same room mutually exclusive.

use tokio::sync::mpsc;

use super::{
    entity::Connection,
    value_object::{ConnectionId, RoomId},
};

/// Frames a connection may have queued before it counts as stalled
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// Send half of a connection's outbound frame queue
pub type OutboundChannel = mpsc::Sender<String>;

/// Receive half of a connection's outbound frame queue, drained by the
/// connection's own pump
pub type OutboundReceiver = mpsc::Receiver<String>;

/// Room → live connections bookkeeping.
///
/// Operations are synchronous: they only touch memory and never hold a lock
/// across an `.await`.
pub trait ConnectionRegistry: Send + Sync {
    /// Add a connection to the set for its room, creating the set if needed.
    fn register(&self, connection: Connection);

    /// Remove a connection. Returns `false` (and does nothing) if it was not
    /// registered.
    fn deregister(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool;

    /// Point-in-time copy of a room's connections, for fan-out.
    ///
    /// A connection that finished deregistering before the call is never
    /// included.
    fn snapshot(&self, room_id: &RoomId) -> Vec<Connection>;

    /// Number of live connections in a room
    fn count(&self, room_id: &RoomId) -> usize;

    /// Number of rooms with at least one live connection
    fn room_count(&self) -> usize;
}
