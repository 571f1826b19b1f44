//! UseCase layer: one use case per inbound event.

mod change_video;
mod connect;
mod disconnect;
mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod relay_voice_signal;
mod send_chat;
mod start_voice;
mod update_playback;

pub use change_video::ChangeVideoUseCase;
pub use connect::ConnectUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{GetRoomDetailError, JoinError, RoomEventError, StartVoiceError, VoiceSignalError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use relay_voice_signal::RelayVoiceSignalUseCase;
pub use send_chat::SendChatUseCase;
pub use start_voice::StartVoiceUseCase;
pub use update_playback::UpdatePlaybackUseCase;
