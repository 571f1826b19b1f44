//! Repository trait 定義
//!
//! ドメイン層が必要とするルームレジストリへのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{
    ConnectionId, Departure, Participant, PlaybackUpdate, RepositoryError, Room, RoomId, VideoId,
};

/// Room Repository trait
///
/// ルーム ID から Room への対応を排他的に所有するレジストリ。
/// 各メソッドは 1 回の呼び出しで読み取りと更新を完結させ、
/// 他の呼び出しと途中で交錯しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 参加者をルームに追加する（ルームが無ければ `created_at` で作成）
    ///
    /// 追加後のルームのスナップショットを返す。
    async fn join_room(
        &self,
        room_id: RoomId,
        participant: Participant,
        created_at: DateTime<Utc>,
    ) -> Room;

    /// 再生状態を更新し、更新後のルームを返す
    async fn update_playback(
        &self,
        room_id: &RoomId,
        update: PlaybackUpdate,
    ) -> Result<Room, RepositoryError>;

    /// 動画を切り替え、更新後のルームを返す
    async fn change_video(
        &self,
        room_id: &RoomId,
        video_id: VideoId,
    ) -> Result<Room, RepositoryError>;

    /// ルームを取得
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 全てのルームを取得（ルーム ID 順）
    async fn get_rooms(&self) -> Vec<Room>;

    /// 参加者を削除し、空になったルームはレジストリから削除する
    async fn remove_participant(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<Departure, RepositoryError>;
}
