//! Conversion logic between DTOs and domain entities.

use syncroom_shared::time::to_iso8601;

use crate::domain::{
    ChatMessage, Participant, PlaybackState, PlaybackUpdate, Room, RoomEvent, VoiceSignalKind,
};
use crate::infrastructure::dto::{
    http::{RoomDetailDto, RoomSummaryDto},
    websocket::{
        ChatBroadcastMessage, ParticipantInfo, PlaybackControlPayload, PlaybackStateInfo,
        RoomStateMessage, ServerEvent, UserConnectedMessage, UserDisconnectedMessage,
        VoiceAnswerMessage, VoiceCandidateMessage, VoiceOfferMessage,
    },
};

// ========================================
// DTO → Domain
// ========================================

impl From<PlaybackControlPayload> for PlaybackUpdate {
    fn from(dto: PlaybackControlPayload) -> Self {
        Self {
            is_playing: dto.is_playing,
            current_time: dto.current_time,
            playback_rate: dto.playback_rate,
            quality: dto.quality,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Participant> for ParticipantInfo {
    fn from(model: &Participant) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            username: model.username.as_str().to_string(),
        }
    }
}

impl From<&PlaybackState> for PlaybackStateInfo {
    fn from(model: &PlaybackState) -> Self {
        Self {
            is_playing: model.is_playing,
            current_time: model.current_time,
            playback_rate: model.playback_rate,
            quality: model.quality.clone(),
        }
    }
}

fn current_video(room: &Room) -> Option<String> {
    room.current_video.as_ref().map(|v| v.as_str().to_string())
}

impl From<&ChatMessage> for ChatBroadcastMessage {
    fn from(model: &ChatMessage) -> Self {
        Self {
            username: model.username.as_str().to_string(),
            message: model.message.clone(),
            timestamp: to_iso8601(model.sent_at),
        }
    }
}

impl From<&RoomEvent> for ServerEvent {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::UserConnected { username } => Self::UserConnected(UserConnectedMessage {
                username: username.as_str().to_string(),
            }),
            RoomEvent::RoomState {
                users,
                current_video,
                playback,
            } => Self::RoomState(RoomStateMessage {
                users: users.iter().map(ParticipantInfo::from).collect(),
                current_video: current_video.as_ref().map(|v| v.as_str().to_string()),
                playback_state: PlaybackStateInfo::from(playback),
            }),
            RoomEvent::PlaybackUpdate(raw) => Self::PlaybackUpdate(raw.clone()),
            RoomEvent::VideoUpdated(raw) => Self::VideoUpdated(raw.clone()),
            RoomEvent::ChatMessage(chat) => Self::ChatMessage(ChatBroadcastMessage::from(chat)),
            RoomEvent::VoiceSignal { kind, from, signal } => {
                let from = from.as_str().to_string();
                let signal = signal.clone();
                match kind {
                    VoiceSignalKind::Offer => Self::VoiceOffer(VoiceOfferMessage::Relay {
                        from,
                        offer: signal,
                    }),
                    VoiceSignalKind::Answer => Self::VoiceAnswer(VoiceAnswerMessage {
                        from,
                        answer: signal,
                    }),
                    VoiceSignalKind::Candidate => Self::VoiceCandidate(VoiceCandidateMessage {
                        from,
                        candidate: signal,
                    }),
                }
            }
            RoomEvent::CallTarget { to } => Self::VoiceOffer(VoiceOfferMessage::CallTarget {
                to: to.as_str().to_string(),
            }),
            RoomEvent::UserDisconnected { username, id } => {
                Self::UserDisconnected(UserDisconnectedMessage {
                    username: username.as_str().to_string(),
                    id: id.as_str().to_string(),
                })
            }
        }
    }
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            participants: room
                .users
                .iter()
                .map(|p| p.username.as_str().to_string())
                .collect(),
            current_video: current_video(room),
            is_playing: room.playback.is_playing,
            created_at: to_iso8601(room.created_at),
        }
    }
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            participants: room.users.iter().map(ParticipantInfo::from).collect(),
            current_video: current_video(room),
            playback_state: PlaybackStateInfo::from(&room.playback),
            created_at: to_iso8601(room.created_at),
        }
    }
}
