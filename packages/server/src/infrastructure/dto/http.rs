//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::{ParticipantInfo, PlaybackStateInfo};

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    /// Usernames in join order
    pub participants: Vec<String>,
    pub current_video: Option<String>,
    pub is_playing: bool,
    /// RFC 3339 (UTC)
    pub created_at: String,
}

/// Body of `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub participants: Vec<ParticipantInfo>,
    pub current_video: Option<String>,
    pub playback_state: PlaybackStateInfo,
    pub created_at: String,
}
