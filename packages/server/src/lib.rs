//! Room relay server library.
//!
//! Participants join a named room over WebSocket and share video playback state,
//! text chat and peer-to-peer voice-call signaling. The server keeps the latest
//! playback snapshot per room in memory and relays events to the other members.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
