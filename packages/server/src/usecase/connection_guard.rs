//! Scoped ownership of one registered connection.
//!
//! The guard drives the `Connecting -> Open -> Closing -> Closed` lifecycle
//! and guarantees the connection is deregistered exactly once: by
//! [`ConnectionGuard::close`] on a normal exit, or by `Drop` when the handler
//! future is cancelled or unwinds.

use std::sync::Arc;

use crate::domain::{ConnectionState, Participant};

use super::DisconnectParticipantUseCase;

pub struct ConnectionGuard {
    participant: Participant,
    state: ConnectionState,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
}

impl ConnectionGuard {
    pub(super) fn new(
        participant: Participant,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    ) -> Self {
        Self {
            participant,
            state: ConnectionState::Connecting,
            disconnect_participant_usecase,
        }
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub(super) fn mark_open(&mut self) {
        if self.state == ConnectionState::Connecting {
            self.state = ConnectionState::Open;
        }
    }

    /// Record that the connection is shutting down (read/send error, close
    /// frame). Has no effect once closing has started.
    pub fn begin_closing(&mut self) {
        if matches!(
            self.state,
            ConnectionState::Connecting | ConnectionState::Open
        ) {
            tracing::debug!(
                "Connection '{}' {:?} -> Closing",
                self.participant.id,
                self.state
            );
            self.state = ConnectionState::Closing;
        }
    }

    /// Deregister the connection and finish the lifecycle.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.begin_closing();
        self.disconnect_participant_usecase.execute(&self.participant);
        self.state = ConnectionState::Closed;
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if self.state != ConnectionState::Closed {
            tracing::debug!(
                "Connection '{}' dropped without close, deregistering",
                self.participant.id
            );
            self.release();
        }
    }
}
