//! Outbound room events.
//!
//! Use cases describe what happened with these values; the `MessagePusher`
//! implementation decides how they are encoded on the wire.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{
    entity::{Participant, PlaybackState, Room, VoiceSignalKind},
    value_object::{ConnectionId, Username, VideoId},
};

/// Chat line relayed to the other members (never stored)
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub username: Username,
    pub message: String,
    /// Server time at relay
    pub sent_at: DateTime<Utc>,
}

/// Notification delivered to one or more connections
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    UserConnected {
        username: Username,
    },
    /// Snapshot for a joiner; `users` never contains the joiner
    RoomState {
        users: Vec<Participant>,
        current_video: Option<VideoId>,
        playback: PlaybackState,
    },
    /// `playback-control` payload exactly as the sender sent it
    PlaybackUpdate(Value),
    /// `video-change` payload exactly as the sender sent it
    VideoUpdated(Value),
    ChatMessage(ChatMessage),
    /// Relayed offer / answer / candidate
    VoiceSignal {
        kind: VoiceSignalKind,
        from: ConnectionId,
        signal: Option<Value>,
    },
    /// `start-voice` reply: a peer the requester should call
    CallTarget {
        to: ConnectionId,
    },
    UserDisconnected {
        username: Username,
        id: ConnectionId,
    },
}

impl RoomEvent {
    /// Snapshot of `room` as seen by `viewer`
    pub fn room_state_for(room: &Room, viewer: &ConnectionId) -> Self {
        Self::RoomState {
            users: room.peers_of(viewer),
            current_video: room.current_video.clone(),
            playback: room.playback.clone(),
        }
    }
}
