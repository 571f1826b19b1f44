//! WebSocket message DTOs.
//!
//! Every frame is a JSON text frame of the form `{"event": "<name>", "data": <payload>}`.
//! Field names inside `data` are camelCase.

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::VoiceSignalKind;

// ========================================
// Inbound (client → server)
// ========================================

/// Errors raised while decoding an inbound frame
#[derive(Debug, Error)]
pub enum EventParseError {
    /// The frame is not a JSON `{event, data}` envelope
    #[error("Malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The event name is not part of the protocol
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    /// The payload does not match the event's shape
    #[error("Invalid payload for '{event}': {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

/// `join-room` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomPayload {
    pub room_id: String,
    pub username: String,
}

/// `playback-control` payload.
///
/// No field is validated: a missing, `null` or wrongly typed value never rejects the
/// frame, so the raw payload is always forwarded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackControlPayload {
    /// Anything but a JSON boolean means paused
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_playing: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub current_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub playback_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub quality: Option<String>,
}

/// Read a field as `T`, treating a value of another type as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::<D, bool>(deserializer)?.unwrap_or(false))
}

/// `video-change` payload (extra fields are kept in the raw value only)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoChangePayload {
    pub video_id: String,
}

/// `chat-message` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatMessagePayload {
    pub message: String,
}

/// `voice-offer` / `voice-answer` / `voice-candidate` payload
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSignalPayload {
    pub kind: VoiceSignalKind,
    /// Recipient connection id
    pub to: String,
    /// SDP offer/answer or ICE candidate, relayed as-is
    pub signal: Option<Value>,
}

/// `start-voice` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartVoicePayload {
    pub room_id: String,
}

/// Decoded inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    JoinRoom(JoinRoomPayload),
    /// `raw` is forwarded verbatim to the other members
    PlaybackControl {
        payload: PlaybackControlPayload,
        raw: Value,
    },
    /// `raw` is forwarded verbatim to the other members
    VideoChange {
        payload: VideoChangePayload,
        raw: Value,
    },
    ChatMessage(ChatMessagePayload),
    VoiceSignal(VoiceSignalPayload),
    StartVoice(StartVoicePayload),
}

fn payload<T: serde::de::DeserializeOwned>(event: &str, data: Value) -> Result<T, EventParseError> {
    serde_json::from_value(data).map_err(|source| EventParseError::InvalidPayload {
        event: event.to_string(),
        source,
    })
}

#[derive(Deserialize)]
struct VoiceSignalFrame {
    to: String,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl ClientEvent {
    /// Decode a text frame
    pub fn parse(text: &str) -> Result<Self, EventParseError> {
        let Envelope { event, data } =
            serde_json::from_str(text).map_err(EventParseError::Malformed)?;

        let decoded = match event.as_str() {
            "join-room" => Self::JoinRoom(payload(&event, data)?),
            "playback-control" => Self::PlaybackControl {
                payload: payload(&event, data.clone())?,
                raw: data,
            },
            "video-change" => Self::VideoChange {
                payload: payload(&event, data.clone())?,
                raw: data,
            },
            "chat-message" => Self::ChatMessage(payload(&event, data)?),
            "start-voice" => Self::StartVoice(payload(&event, data)?),
            name => match VoiceSignalKind::from_event_name(name) {
                Some(kind) => {
                    let VoiceSignalFrame { to, mut rest } = payload(&event, data)?;
                    Self::VoiceSignal(VoiceSignalPayload {
                        kind,
                        to,
                        signal: rest.remove(kind.field_name()),
                    })
                }
                None => return Err(EventParseError::UnknownEvent(event)),
            },
        };

        Ok(decoded)
    }

    /// Event name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::JoinRoom(_) => "join-room",
            Self::PlaybackControl { .. } => "playback-control",
            Self::VideoChange { .. } => "video-change",
            Self::ChatMessage(_) => "chat-message",
            Self::VoiceSignal(payload) => payload.kind.event_name(),
            Self::StartVoice(_) => "start-voice",
        }
    }
}

// ========================================
// Outbound (server → client)
// ========================================

/// Participant as seen by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub id: String,
    pub username: String,
}

/// Playback snapshot as seen by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStateInfo {
    pub is_playing: bool,
    pub current_time: f64,
    pub playback_rate: f64,
    pub quality: String,
}

/// `user-connected` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConnectedMessage {
    pub username: String,
}

/// `room-state` payload: the snapshot sent to a joiner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateMessage {
    /// Everyone in the room except the recipient
    pub users: Vec<ParticipantInfo>,
    pub current_video: Option<String>,
    pub playback_state: PlaybackStateInfo,
}

/// `chat-message` payload as relayed to peers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatBroadcastMessage {
    pub username: String,
    pub message: String,
    /// Server time, ISO 8601
    pub timestamp: String,
}

/// `voice-offer` payload.
///
/// The same event name carries two shapes: a relayed offer `{from, offer}` and the
/// `start-voice` reply `{to}` telling the requester whom to call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoiceOfferMessage {
    Relay {
        from: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        offer: Option<Value>,
    },
    CallTarget {
        to: String,
    },
}

/// `voice-answer` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceAnswerMessage {
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
}

/// `voice-candidate` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCandidateMessage {
    pub from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Value>,
}

/// `user-disconnected` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDisconnectedMessage {
    pub username: String,
    pub id: String,
}

/// Outbound event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    UserConnected(UserConnectedMessage),
    RoomState(RoomStateMessage),
    /// Raw `playback-control` payload of the sender
    PlaybackUpdate(Value),
    /// Raw `video-change` payload of the sender
    VideoUpdated(Value),
    ChatMessage(ChatBroadcastMessage),
    VoiceOffer(VoiceOfferMessage),
    VoiceAnswer(VoiceAnswerMessage),
    VoiceCandidate(VoiceCandidateMessage),
    UserDisconnected(UserDisconnectedMessage),
}

impl ServerEvent {
    /// Serialize into a text frame body
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
