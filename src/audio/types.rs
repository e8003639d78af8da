//! Engine-facing types: transport state, media status, events and the
//! `PlaybackEngine` capability the controller drives.

use std::path::Path;

/// Transport state of the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Lifecycle status of the current media source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MediaStatus {
    /// No source has been set.
    #[default]
    NoMedia,
    /// A source was opened and is ready to play.
    Loaded,
    /// The source is being rendered.
    Buffered,
    /// The source played through to its end.
    EndOfMedia,
    /// The source could not be opened, decoded or played.
    InvalidMedia,
}

/// Notifications emitted by an engine, in the order they happened.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PositionChanged(u64),
    DurationChanged(u64),
    MediaStatusChanged(MediaStatus),
}

/// The commands a playback backend accepts and the events it reports back.
///
/// Positions and durations are in milliseconds. Implementations never fail
/// loudly: problems with a source surface as `MediaStatus::InvalidMedia`.
pub trait PlaybackEngine {
    fn set_source(&mut self, path: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop playback and rewind to the start of the source.
    fn stop(&mut self);
    fn set_position(&mut self, ms: u64);
    fn state(&self) -> EngineState;
    /// Take every event emitted since the previous call.
    fn drain_events(&mut self) -> Vec<EngineEvent>;
}
