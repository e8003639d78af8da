//! The playback controller: playlist, current track and transport.
//!
//! The controller owns all playback state. The UI reads it through getters
//! and changes it only through the transport operations; engine events are
//! fed back in through `process_engine_events`.

mod controller;
mod error;
mod playlist;

pub use controller::{Controller, PlaybackPosition, PlayerState};
pub use error::PlayerError;
pub use playlist::{Playlist, PlaylistEntry};

#[cfg(test)]
mod tests;
