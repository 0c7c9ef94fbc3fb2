//! UseCase error types.

use thiserror::Error;

/// Errors of [`super::CreateRoomUseCase`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("Room '{0}' already exists")]
    AlreadyExists(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Errors of [`super::JoinRoomUseCase`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// Unknown room or wrong password. The caller cannot tell which.
    #[error("Invalid Room ID or Password")]
    Unauthorized,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Errors of [`super::GetHistoryUseCase`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetHistoryError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}
