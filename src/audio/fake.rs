//! In-memory `PlaybackEngine` used by controller and app tests.

use std::path::{Path, PathBuf};

use super::events::EventQueue;
use super::types::{EngineEvent, EngineState, MediaStatus, PlaybackEngine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    SetSource(PathBuf),
    Play,
    Pause,
    Stop,
    SetPosition(u64),
}

#[derive(Debug, Default)]
pub(crate) struct FakeEngine {
    pub calls: Vec<Call>,
    pub source: Option<PathBuf>,
    pub position_ms: u64,
    state: EngineState,
    events: EventQueue,
}

impl FakeEngine {
    /// Simulate the source playing through to its end.
    pub fn finish_track(&mut self) {
        self.state = EngineState::Stopped;
        self.events.status(MediaStatus::EndOfMedia);
    }

    /// Simulate playback progress reported by the backend.
    pub fn advance_to(&mut self, ms: u64) {
        self.position_ms = ms;
        self.events.position(ms);
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl PlaybackEngine for FakeEngine {
    fn set_source(&mut self, path: &Path) {
        self.calls.push(Call::SetSource(path.to_path_buf()));
        self.source = Some(path.to_path_buf());
        self.state = EngineState::Stopped;
        self.position_ms = 0;
        self.events.reset_source();
        self.events.position(0);
        self.events.duration(180_000);
        self.events.status(MediaStatus::Loaded);
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
        if self.source.is_some() {
            self.state = EngineState::Playing;
            self.events.status(MediaStatus::Buffered);
        }
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        if self.source.is_some() {
            self.state = EngineState::Paused;
        }
    }

    fn stop(&mut self) {
        self.calls.push(Call::Stop);
        self.state = EngineState::Stopped;
        self.position_ms = 0;
        self.events.position(0);
    }

    fn set_position(&mut self, ms: u64) {
        self.calls.push(Call::SetPosition(ms));
        self.position_ms = ms;
        self.events.position(ms);
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain()
    }
}
