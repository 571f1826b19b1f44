//! Server state and dependency wiring.

use std::sync::Arc;

use syncroom_shared::time::Clock;

use crate::{
    domain::{MessagePusher, RoomRepository},
    usecase::{
        ChangeVideoUseCase, ConnectUseCase, DisconnectUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, JoinRoomUseCase, RelayVoiceSignalUseCase, SendChatUseCase,
        StartVoiceUseCase, UpdatePlaybackUseCase,
    },
};

/// Shared application state
pub struct AppState {
    pub connect_usecase: ConnectUseCase,
    pub join_room_usecase: JoinRoomUseCase,
    pub update_playback_usecase: UpdatePlaybackUseCase,
    pub change_video_usecase: ChangeVideoUseCase,
    pub send_chat_usecase: SendChatUseCase,
    pub relay_voice_signal_usecase: RelayVoiceSignalUseCase,
    pub start_voice_usecase: StartVoiceUseCase,
    pub disconnect_usecase: DisconnectUseCase,
    pub get_rooms_usecase: GetRoomsUseCase,
    pub get_room_detail_usecase: GetRoomDetailUseCase,
}

impl AppState {
    /// Build every use case on top of one registry, one pusher and one clock
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connect_usecase: ConnectUseCase::new(message_pusher.clone()),
            join_room_usecase: JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            update_playback_usecase: UpdatePlaybackUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            change_video_usecase: ChangeVideoUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            send_chat_usecase: SendChatUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock,
            ),
            relay_voice_signal_usecase: RelayVoiceSignalUseCase::new(message_pusher.clone()),
            start_voice_usecase: StartVoiceUseCase::new(repository.clone(), message_pusher.clone()),
            disconnect_usecase: DisconnectUseCase::new(repository.clone(), message_pusher),
            get_rooms_usecase: GetRoomsUseCase::new(repository.clone()),
            get_room_detail_usecase: GetRoomDetailUseCase::new(repository),
        }
    }
}
