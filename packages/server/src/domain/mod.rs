//! Domain layer: room and connection models plus the ports the use cases depend on.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    Connection, Departure, Membership, Participant, PlaybackState, PlaybackUpdate, Room,
    VoiceSignalKind,
};
pub use error::{ConnectionError, MessagePushError, RepositoryError};
pub use event::{ChatMessage, RoomEvent};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, ConnectionIdFactory, RoomId, Username, VideoId};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
