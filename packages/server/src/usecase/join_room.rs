//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームの作成・参加者の追加・既存参加者への通知・参加者へのスナップショット送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの参加、既存ルームへの参加
//! - 異常系：同じ接続での二重参加
//! - エッジケース：同じユーザー名での参加（拒否しない）

use std::sync::Arc;

use syncroom_shared::time::Clock;

use crate::domain::{
    Connection, MessagePusher, Participant, Room, RoomEvent, RoomId, RoomRepository, Username,
};

use super::error::JoinError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// ルーム作成時刻の取得元
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// 1. 接続に参加情報を記録
    /// 2. ルームを（必要なら作成して）参加者を追加
    /// 3. 他の参加者に `user-connected` を通知
    /// 4. 参加者本人に `room-state` を送信
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 参加後のルーム
    /// * `Err(JoinError)` - 参加失敗
    pub async fn execute(
        &self,
        connection: &mut Connection,
        room_id: RoomId,
        username: Username,
    ) -> Result<Room, JoinError> {
        connection.join(room_id.clone(), username.clone())?;

        let participant = Participant::new(connection.id.clone(), username.clone());
        let room = self
            .repository
            .join_room(room_id, participant, self.clock.now())
            .await;

        let joined = RoomEvent::UserConnected {
            username: username.clone(),
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(room.peer_ids_of(&connection.id), &joined)
            .await
        {
            tracing::warn!("Failed to broadcast user-connected: {}", e);
        }

        let snapshot = RoomEvent::room_state_for(&room, &connection.id);
        if let Err(e) = self.message_pusher.push_to(&connection.id, &snapshot).await {
            tracing::warn!("Failed to send room-state to '{}': {}", connection.id, e);
        }

        tracing::info!("{} joined room {}", username, room.id);
        Ok(room)
    }
}
