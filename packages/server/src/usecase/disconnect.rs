//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - 参加者の削除、残りの参加者への通知、空になったルームの削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：他の参加者が残る切断（通知あり、ルームは残る）
//! - エッジケース：最後の参加者の切断（ルーム削除）
//! - 異常系：未参加の接続の切断（通知なし、状態変化なし）

use std::sync::Arc;

use crate::domain::{Connection, Departure, MessagePusher, RoomEvent, RoomRepository};

use super::error::RoomEventError;

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 送信先の登録は必ず解除する。ルームに参加していた場合は参加者を削除し、
    /// 残りの参加者に `user-disconnected` を通知する（空になったルームは削除済み）。
    ///
    /// # Returns
    ///
    /// * `Ok(Departure)` - 残りの参加者とルーム削除の有無
    /// * `Err(RoomEventError)` - 未参加、またはルームが既に存在しない
    pub async fn execute(&self, connection: &Connection) -> Result<Departure, RoomEventError> {
        self.message_pusher.unregister_client(&connection.id).await;

        let membership = connection.membership().ok_or(RoomEventError::NotJoined)?;
        let message = RoomEvent::UserDisconnected {
            username: membership.username.clone(),
            id: connection.id.clone(),
        };

        let departure = self
            .repository
            .remove_participant(&membership.room_id, &connection.id)
            .await?;

        let targets = departure.remaining.iter().map(|p| p.id.clone()).collect();
        if let Err(e) = self.message_pusher.broadcast(targets, &message).await {
            tracing::warn!("Failed to broadcast user-disconnected: {}", e);
        }

        Ok(departure)
    }
}
