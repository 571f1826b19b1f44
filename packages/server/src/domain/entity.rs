//! Domain entities.
//!
//! A `Room` holds the authoritative "last known" playback snapshot and the ordered
//! list of participants. A `Connection` tracks which room (if any) a socket joined.

use chrono::{DateTime, Utc};

use super::{
    error::ConnectionError,
    value_object::{ConnectionId, RoomId, Username, VideoId},
};

/// Quality label used until a client picks one
pub const DEFAULT_QUALITY: &str = "auto";

/// Room membership recorded on a connection at join time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub room_id: RoomId,
    pub username: Username,
}

/// A single transport connection.
///
/// Lifecycle: `Unjoined -> Joined(room, username)`; the membership never changes
/// once set. Dropping the connection is the terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    membership: Option<Membership>,
}

impl Connection {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            membership: None,
        }
    }

    /// Record the room membership of this connection.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::AlreadyJoined` if the connection already joined a room.
    pub fn join(&mut self, room_id: RoomId, username: Username) -> Result<(), ConnectionError> {
        if let Some(membership) = &self.membership {
            return Err(ConnectionError::AlreadyJoined(
                membership.room_id.as_str().to_string(),
            ));
        }
        self.membership = Some(Membership { room_id, username });
        Ok(())
    }

    pub fn membership(&self) -> Option<&Membership> {
        self.membership.as_ref()
    }
}

/// Room member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ConnectionId,
    pub username: Username,
}

impl Participant {
    pub fn new(id: ConnectionId, username: Username) -> Self {
        Self { id, username }
    }
}

/// Shared playback snapshot of a room
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Offset in seconds
    pub current_time: f64,
    pub playback_rate: f64,
    pub quality: String,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            playback_rate: 1.0,
            quality: DEFAULT_QUALITY.to_string(),
        }
    }
}

/// Playback change sent by a client.
///
/// `is_playing` is always applied; the other fields only when present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaybackUpdate {
    pub is_playing: bool,
    pub current_time: Option<f64>,
    pub playback_rate: Option<f64>,
    pub quality: Option<String>,
}

impl PlaybackState {
    /// Overwrite the snapshot with the fields carried by `update`
    pub fn apply(&mut self, update: PlaybackUpdate) {
        self.is_playing = update.is_playing;
        if let Some(current_time) = update.current_time {
            self.current_time = current_time;
        }
        if let Some(playback_rate) = update.playback_rate {
            self.playback_rate = playback_rate;
        }
        if let Some(quality) = update.quality {
            self.quality = quality;
        }
    }
}

/// WebRTC signaling message kinds relayed between two connections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceSignalKind {
    Offer,
    Answer,
    Candidate,
}

impl VoiceSignalKind {
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "voice-offer" => Some(Self::Offer),
            "voice-answer" => Some(Self::Answer),
            "voice-candidate" => Some(Self::Candidate),
            _ => None,
        }
    }

    /// Event name used in both directions
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Offer => "voice-offer",
            Self::Answer => "voice-answer",
            Self::Candidate => "voice-candidate",
        }
    }

    /// Payload field holding the signal
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::Candidate => "candidate",
        }
    }
}

/// Result of removing a connection from a room
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    /// Participants still in the room, in join order
    pub remaining: Vec<Participant>,
    /// `true` if the room became empty and was deleted
    pub room_closed: bool,
}

/// Watch room
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    /// Participants in join order
    pub users: Vec<Participant>,
    pub current_video: Option<VideoId>,
    pub playback: PlaybackState,
    pub created_at: DateTime<Utc>,
}

impl Room {
    /// Create an empty room with default playback state
    pub fn new(id: RoomId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            users: Vec::new(),
            current_video: None,
            playback: PlaybackState::default(),
            created_at,
        }
    }

    /// Append a participant (no de-duplication happens here)
    pub fn add_participant(&mut self, participant: Participant) {
        self.users.push(participant);
    }

    /// Remove every entry belonging to `connection_id`, returning how many were removed
    pub fn remove_participant(&mut self, connection_id: &ConnectionId) -> usize {
        let before = self.users.len();
        self.users.retain(|p| &p.id != connection_id);
        before - self.users.len()
    }

    /// Participants other than `connection_id`, in join order
    pub fn peers_of(&self, connection_id: &ConnectionId) -> Vec<Participant> {
        self.users
            .iter()
            .filter(|p| &p.id != connection_id)
            .cloned()
            .collect()
    }

    /// Connection ids of every participant except `connection_id`
    pub fn peer_ids_of(&self, connection_id: &ConnectionId) -> Vec<ConnectionId> {
        self.users
            .iter()
            .filter(|p| &p.id != connection_id)
            .map(|p| p.id.clone())
            .collect()
    }

    pub fn apply_playback(&mut self, update: PlaybackUpdate) {
        self.playback.apply(update);
    }

    /// Switch video: rewinds to zero and starts playing regardless of prior state
    pub fn change_video(&mut self, video_id: VideoId) {
        self.current_video = Some(video_id);
        self.playback.current_time = 0.0;
        self.playback.is_playing = true;
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
