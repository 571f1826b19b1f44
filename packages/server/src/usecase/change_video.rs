//! UseCase: 動画変更処理

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{Connection, MessagePusher, Room, RoomEvent, RoomRepository, VideoId};

use super::error::RoomEventError;

/// 動画変更のユースケース
pub struct ChangeVideoUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ChangeVideoUseCase {
    /// 新しい ChangeVideoUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 動画を切り替え（再生位置 0、再生中）、`raw` を他の参加者へ `video-updated` として転送する
    pub async fn execute(
        &self,
        connection: &Connection,
        video_id: VideoId,
        raw: Value,
    ) -> Result<Room, RoomEventError> {
        let membership = connection.membership().ok_or(RoomEventError::NotJoined)?;
        let room = self
            .repository
            .change_video(&membership.room_id, video_id)
            .await?;

        if let Err(e) = self
            .message_pusher
            .broadcast(room.peer_ids_of(&connection.id), &RoomEvent::VideoUpdated(raw))
            .await
        {
            tracing::warn!("Failed to broadcast video-updated: {}", e);
        }

        Ok(room)
    }
}
