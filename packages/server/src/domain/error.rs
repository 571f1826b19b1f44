//! Domain errors.

use thiserror::Error;

/// Room registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No room is registered under the given id
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// Message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The connection is not (or no longer) registered
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    /// The connection's outbound channel is closed
    #[error("Failed to push message: {0}")]
    PushFailed(String),

    /// The event could not be encoded for the transport
    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),
}

/// Connection lifecycle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// The connection is already a member of a room
    #[error("Connection already joined room '{0}'")]
    AlreadyJoined(String),
}
