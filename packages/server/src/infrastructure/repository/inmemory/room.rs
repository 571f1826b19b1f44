//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリのルームレジストリとして使用します。
//!
//! 全ての操作は単一の Mutex の内側で完結するため、
//! ある操作の途中に別の操作が割り込むことはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, Departure, Participant, PlaybackUpdate, RepositoryError, Room, RoomId,
    RoomRepository, VideoId,
};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// Room ID → Room
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }
}

fn room_not_found(room_id: &RoomId) -> RepositoryError {
    RepositoryError::RoomNotFound(room_id.as_str().to_string())
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join_room(
        &self,
        room_id: RoomId,
        participant: Participant,
        created_at: DateTime<Utc>,
    ) -> Room {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.entry(room_id.clone()).or_insert_with(|| {
            tracing::info!("Room '{}' created", room_id);
            Room::new(room_id, created_at)
        });
        room.add_participant(participant);
        room.clone()
    }

    async fn update_playback(
        &self,
        room_id: &RoomId,
        update: PlaybackUpdate,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id).ok_or_else(|| room_not_found(room_id))?;
        room.apply_playback(update);
        Ok(room.clone())
    }

    async fn change_video(
        &self,
        room_id: &RoomId,
        video_id: VideoId,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id).ok_or_else(|| room_not_found(room_id))?;
        room.change_video(video_id);
        Ok(room.clone())
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned().ok_or_else(|| room_not_found(room_id))
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut result: Vec<Room> = rooms.values().cloned().collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));
        result
    }

    async fn remove_participant(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<Departure, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.get_mut(room_id).ok_or_else(|| room_not_found(room_id))?;
        room.remove_participant(connection_id);

        let remaining = room.users.clone();
        let room_closed = room.is_empty();
        if room_closed {
            rooms.remove(room_id);
            tracing::info!("Room '{}' is empty and has been deleted", room_id);
        }

        Ok(Departure {
            remaining,
            room_closed,
        })
    }
}
