//! UseCase errors.
//!
//! None of these are reported back to clients; the event router logs and drops them.

use thiserror::Error;

use crate::domain::{ConnectionError, RepositoryError};

/// `join-room` errors
#[derive(Debug, Error)]
pub enum JoinError {
    /// The connection already belongs to a room
    #[error("Connection already joined room '{0}'")]
    AlreadyJoined(String),
}

impl From<ConnectionError> for JoinError {
    fn from(error: ConnectionError) -> Self {
        match error {
            ConnectionError::AlreadyJoined(room_id) => Self::AlreadyJoined(room_id),
        }
    }
}

/// Errors of events that act on the sender's own room
#[derive(Debug, Error)]
pub enum RoomEventError {
    /// The connection never joined a room
    #[error("Connection has not joined a room")]
    NotJoined,

    /// The connection's room is no longer registered
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

impl From<RepositoryError> for RoomEventError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room_id) => Self::RoomNotFound(room_id),
        }
    }
}

/// Voice signaling relay errors
#[derive(Debug, Error)]
pub enum VoiceSignalError {
    /// No live connection has the target id
    #[error("Recipient '{0}' not found")]
    RecipientNotFound(String),

    /// The recipient's channel is closed
    #[error("Failed to deliver signal: {0}")]
    DeliveryFailed(String),
}

/// `start-voice` errors
#[derive(Debug, Error)]
pub enum StartVoiceError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

impl From<RepositoryError> for StartVoiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room_id) => Self::RoomNotFound(room_id),
        }
    }
}

/// Room detail lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}
