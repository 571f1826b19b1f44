//! UseCase: 再生状態の同期処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdatePlaybackUseCase::execute() メソッド
//! - ルームの再生状態の更新と、受信したペイロードそのままの転送
//!
//! ### どのような状況を想定しているか
//! - 正常系：送信者以外への転送
//! - 異常系：未参加の接続からの操作（何もしない）

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{Connection, MessagePusher, PlaybackUpdate, Room, RoomEvent, RoomRepository};

use super::error::RoomEventError;

/// 再生状態同期のユースケース
pub struct UpdatePlaybackUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdatePlaybackUseCase {
    /// 新しい UpdatePlaybackUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 再生状態を更新し、`raw`（受信したペイロード）を他の参加者へ `playback-update` として転送する
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 更新後のルーム
    /// * `Err(RoomEventError)` - 未参加、またはルームが存在しない
    pub async fn execute(
        &self,
        connection: &Connection,
        update: PlaybackUpdate,
        raw: Value,
    ) -> Result<Room, RoomEventError> {
        let membership = connection.membership().ok_or(RoomEventError::NotJoined)?;
        let room = self
            .repository
            .update_playback(&membership.room_id, update)
            .await?;

        if let Err(e) = self
            .message_pusher
            .broadcast(
                room.peer_ids_of(&connection.id),
                &RoomEvent::PlaybackUpdate(raw),
            )
            .await
        {
            tracing::warn!("Failed to broadcast playback-update: {}", e);
        }

        Ok(room)
    }
}
