//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatUseCase::execute() メソッド
//! - 送信者以外への配信、サーバー時刻のタイムスタンプ付与
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム内の他の参加者への配信（別のルームには届かない）
//! - 異常系：未参加の接続からの送信（何もしない）

use std::sync::Arc;

use syncroom_shared::time::Clock;

use crate::domain::{ChatMessage, Connection, MessagePusher, RoomEvent, RoomRepository};

use super::error::RoomEventError;

/// チャット送信のユースケース
///
/// メッセージはルームに保存されない（配信のみ）。
pub struct SendChatUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// タイムスタンプの取得元
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
    /// 新しい SendChatUseCase を作成
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

    /// チャットメッセージを他の参加者に配信する
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 配信した内容
    /// * `Err(RoomEventError)` - 未参加、またはルームが存在しない
    pub async fn execute(
        &self,
        connection: &Connection,
        message: String,
    ) -> Result<ChatMessage, RoomEventError> {
        let membership = connection.membership().ok_or(RoomEventError::NotJoined)?;
        let room = self.repository.get_room(&membership.room_id).await?;

        let chat = ChatMessage {
            username: membership.username.clone(),
            message,
            sent_at: self.clock.now(),
        };

        if let Err(e) = self
            .message_pusher
            .broadcast(
                room.peer_ids_of(&connection.id),
                &RoomEvent::ChatMessage(chat.clone()),
            )
            .await
        {
            tracing::warn!("Failed to broadcast chat-message: {}", e);
        }

        Ok(chat)
    }
}
