//! UseCase: 接続確立処理
//!
//! トランスポート接続時に接続 ID を払い出し、送信チャンネルを登録する。

use std::sync::Arc;

use crate::domain::{Connection, ConnectionIdFactory, MessagePusher, PusherChannel};

/// 接続確立のユースケース
pub struct ConnectUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectUseCase {
    /// 新しい ConnectUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を確立し、未参加状態の Connection を返す
    pub async fn execute(&self, sender: PusherChannel) -> Connection {
        let connection_id = ConnectionIdFactory::generate();
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        Connection::new(connection_id)
    }
}
