//! UseCase: 音声通話シグナリングの中継処理
//!
//! offer / answer / candidate を宛先の接続へそのまま中継する。
//! ルームの概念は使わず、接続 ID だけで宛先を決める。

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, RoomEvent, VoiceSignalKind};

use super::error::VoiceSignalError;

/// シグナリング中継のユースケース
pub struct RelayVoiceSignalUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayVoiceSignalUseCase {
    /// 新しい RelayVoiceSignalUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// `from` から `to` へシグナルを中継する
    ///
    /// 宛先には `{from, <offer|answer|candidate>}` が 1 通だけ届き、送信者には何も届かない。
    pub async fn execute(
        &self,
        kind: VoiceSignalKind,
        from: &ConnectionId,
        to: &ConnectionId,
        signal: Option<Value>,
    ) -> Result<(), VoiceSignalError> {
        let event = RoomEvent::VoiceSignal {
            kind,
            from: from.clone(),
            signal,
        };

        self.message_pusher
            .push_to(to, &event)
            .await
            .map_err(|e| match e {
                MessagePushError::ClientNotFound(id) => VoiceSignalError::RecipientNotFound(id),
                MessagePushError::PushFailed(reason) | MessagePushError::EncodeFailed(reason) => {
                    VoiceSignalError::DeliveryFailed(reason)
                }
            })
    }
}
