use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::audio::{EngineEvent, EngineState, MediaStatus, PlaybackEngine};
use crate::metadata::{Resolver, TrackInfo};

use super::error::PlayerError;
use super::playlist::Playlist;

/// Engine-reported position and duration, in milliseconds.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct PlaybackPosition {
    pub position_ms: u64,
    pub duration_ms: u64,
}

/// Observable controller state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerState {
    /// No track has been selected yet.
    Idle,
    /// A track is selected but not playing (fresh load, stop, or end of media).
    Loaded,
    Playing,
    Paused,
}

pub struct Controller<E: PlaybackEngine> {
    engine: E,
    resolver: Resolver,
    playlist: Playlist,
    current: Option<usize>,
    position: PlaybackPosition,
    track: Option<TrackInfo>,
}

impl<E: PlaybackEngine> Controller<E> {
    pub fn new(engine: E, resolver: Resolver, playlist: Playlist) -> Self {
        Self {
            engine,
            resolver,
            playlist,
            current: None,
            position: PlaybackPosition::default(),
            track: None,
        }
    }

    /// Append every supported path, in order. Returns how many were accepted.
    pub fn add_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            let path = path.into();
            if !self.playlist.is_supported(&path) {
                debug!("skipping unsupported file {}", path.display());
                continue;
            }
            let display = self.resolver.display_name(&path);
            self.playlist.push(path, display);
            added += 1;
        }
        added
    }

    /// Load the track at `index` and start playing it.
    pub fn play_selected(&mut self, index: usize) -> Result<(), PlayerError> {
        if index >= self.playlist.len() {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: self.playlist.len(),
            });
        }
        self.advance_to(index);
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        if self.engine.state() == EngineState::Playing {
            self.engine.pause();
            return;
        }
        if self.current.is_none() && !self.playlist.is_empty() {
            self.current = Some(0);
            self.load(0);
        }
        self.engine.play();
    }

    /// Stop the engine. The current track stays selected.
    pub fn stop(&mut self) {
        self.engine.stop();
    }

    pub fn next(&mut self) {
        let next = self.current.map_or(0, |i| i + 1);
        if next < self.playlist.len() {
            self.advance_to(next);
        }
    }

    pub fn previous(&mut self) {
        if let Some(i) = self.current.filter(|&i| i > 0) {
            self.advance_to(i - 1);
        }
    }

    pub fn on_end_of_media(&mut self) {
        self.next();
    }

    pub fn on_media_status_changed(&mut self, status: MediaStatus) {
        match status {
            MediaStatus::EndOfMedia => self.on_end_of_media(),
            MediaStatus::InvalidMedia => {
                let path = self.current_path().map(|p| p.display().to_string());
                warn!("engine could not play {}", path.as_deref().unwrap_or("<none>"));
            }
            _ => {}
        }
    }

    pub fn on_position_changed(&mut self, ms: u64) {
        self.position.position_ms = ms;
    }

    pub fn on_duration_changed(&mut self, ms: u64) {
        self.position.duration_ms = ms;
    }

    /// Forward a user seek straight to the engine.
    pub fn seek(&mut self, ms: u64) {
        self.engine.set_position(ms);
    }

    /// Drain the engine's pending events and apply them in emission order.
    pub fn process_engine_events(&mut self) -> usize {
        let events = self.engine.drain_events();
        let n = events.len();
        for event in events {
            self.handle_engine_event(event);
        }
        n
    }

    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::PositionChanged(ms) => self.on_position_changed(ms),
            EngineEvent::DurationChanged(ms) => self.on_duration_changed(ms),
            EngineEvent::MediaStatusChanged(status) => self.on_media_status_changed(status),
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current
            .and_then(|i| self.playlist.get(i))
            .map(|e| e.path.as_path())
    }

    pub fn is_playing(&self) -> bool {
        self.engine.state() == EngineState::Playing
    }

    pub fn state(&self) -> PlayerState {
        match (self.current, self.engine.state()) {
            (None, _) => PlayerState::Idle,
            (Some(_), EngineState::Playing) => PlayerState::Playing,
            (Some(_), EngineState::Paused) => PlayerState::Paused,
            (Some(_), EngineState::Stopped) => PlayerState::Loaded,
        }
    }

    pub fn position(&self) -> PlaybackPosition {
        self.position
    }

    /// Title and cover of the last loaded track.
    pub fn track_info(&self) -> Option<&TrackInfo> {
        self.track.as_ref()
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn advance_to(&mut self, index: usize) {
        self.current = Some(index);
        self.load(index);
        self.engine.play();
    }

    fn load(&mut self, index: usize) {
        let Some(path) = self.playlist.get(index).map(|e| e.path.clone()) else {
            return;
        };
        info!("loading track {index}: {}", path.display());

        self.engine.stop();
        self.engine.set_source(&path);
        self.position = PlaybackPosition::default();
        self.track = Some(self.resolver.resolve(&path));
    }
}
