//! UseCase: 音声通話の開始処理
//!
//! 要求した接続に対して、ルーム内の他の参加者ごとに `voice-offer{to}` を 1 通ずつ返す。
//! 他の参加者には何も送らない（発信は要求者が行う）。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, RoomId, RoomRepository};

use super::error::StartVoiceError;

/// 音声通話開始のユースケース
pub struct StartVoiceUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl StartVoiceUseCase {
    /// 新しい StartVoiceUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 発信先の一覧を要求者へ送信する
    ///
    /// ルームは要求者の所属ではなくペイロードで指定されたものを使う。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 発信先として通知した接続 ID（参加順）
    /// * `Err(StartVoiceError)` - ルームが存在しない
    pub async fn execute(
        &self,
        requester: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, StartVoiceError> {
        let room = self.repository.get_room(room_id).await?;
        let targets = room.peer_ids_of(requester);

        for target in &targets {
            let message = RoomEvent::CallTarget { to: target.clone() };
            if let Err(e) = self.message_pusher.push_to(requester, &message).await {
                tracing::warn!("Failed to send call target to '{}': {}", requester, e);
                break;
            }
        }

        Ok(targets)
    }
}
