//! Routes decoded client events to their use cases.
//!
//! Failed preconditions (not joined, room gone, unknown recipient) are silent for
//! the client: they are logged at debug level and the event is dropped.

use crate::{
    domain::{Connection, ConnectionId, RoomId, Username, VideoId},
    infrastructure::dto::websocket::{
        ChatMessagePayload, ClientEvent, JoinRoomPayload, StartVoicePayload, VideoChangePayload,
        VoiceSignalPayload,
    },
    ui::state::AppState,
};

/// Convert payload strings into value objects and run the matching use case
pub async fn dispatch_event(state: &AppState, connection: &mut Connection, event: ClientEvent) {
    tracing::debug!("'{}' -> {}", connection.id, event.name());

    match event {
        ClientEvent::JoinRoom(JoinRoomPayload { room_id, username }) => {
            if let Err(e) = state
                .join_room_usecase
                .execute(connection, RoomId::new(room_id), Username::new(username))
                .await
            {
                tracing::debug!("join-room ignored for '{}': {}", connection.id, e);
            }
        }
        ClientEvent::PlaybackControl { payload, raw } => {
            if let Err(e) = state
                .update_playback_usecase
                .execute(connection, payload.into(), raw)
                .await
            {
                tracing::debug!("playback-control ignored for '{}': {}", connection.id, e);
            }
        }
        ClientEvent::VideoChange {
            payload: VideoChangePayload { video_id },
            raw,
        } => {
            if let Err(e) = state
                .change_video_usecase
                .execute(connection, VideoId::new(video_id), raw)
                .await
            {
                tracing::debug!("video-change ignored for '{}': {}", connection.id, e);
            }
        }
        ClientEvent::ChatMessage(ChatMessagePayload { message }) => {
            if let Err(e) = state.send_chat_usecase.execute(connection, message).await {
                tracing::debug!("chat-message ignored for '{}': {}", connection.id, e);
            }
        }
        ClientEvent::VoiceSignal(VoiceSignalPayload { kind, to, signal }) => {
            if let Err(e) = state
                .relay_voice_signal_usecase
                .execute(kind, &connection.id, &ConnectionId::new(to), signal)
                .await
            {
                tracing::debug!("{} not relayed: {}", kind.event_name(), e);
            }
        }
        ClientEvent::StartVoice(StartVoicePayload { room_id }) => {
            if let Err(e) = state
                .start_voice_usecase
                .execute(&connection.id, &RoomId::new(room_id))
                .await
            {
                tracing::debug!("start-voice ignored for '{}': {}", connection.id, e);
            }
        }
    }
}
