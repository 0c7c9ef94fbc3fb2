//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} is too long: {actual} characters (max {max})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{0} must not contain '/'")]
    ContainsSlash(&'static str),
}

/// Errors reported by the room, history, and archive stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The key being inserted already exists
    #[error("Room '{0}' already exists")]
    AlreadyExists(String),

    /// The requested key does not exist
    #[error("Room '{0}' not found")]
    NotFound(String),

    /// The backing store failed (I/O, database, corrupt data)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while pushing a frame to a single connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    #[error("Connection '{0}' is closed")]
    ConnectionClosed(String),

    /// The connection's outbound queue is full; its client is not reading
    #[error("Connection '{0}' outbound queue is full")]
    QueueFull(String),
}
