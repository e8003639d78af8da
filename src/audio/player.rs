use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use super::error::EngineError;
use super::events::EventQueue;
use super::sink::{create_sink, duration_ms};
use super::types::{EngineEvent, EngineState, MediaStatus, PlaybackEngine};

/// `PlaybackEngine` backed by a rodio output stream and one `Sink` per source.
///
/// Stopping drops the sink; the next `play` rebuilds it from the source path,
/// which is how a stop rewinds to the start.
pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    state: EngineState,
    volume: f32,
    events: EventQueue,
}

impl RodioEngine {
    /// Open the default output device.
    pub fn open_default(volume: f32) -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped, which would land
        // on top of the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            source: None,
            state: EngineState::Stopped,
            volume,
            events: EventQueue::default(),
        })
    }

    fn fail(&mut self, err: EngineError) {
        warn!("playback engine: {err}");
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.state = EngineState::Stopped;
        self.events.status(MediaStatus::InvalidMedia);
    }

    /// Make sure a sink exists for the current source, rebuilding it after a stop.
    fn ensure_sink(&mut self) -> bool {
        if self.sink.is_some() {
            return true;
        }
        let Some(path) = self.source.clone() else {
            return false;
        };
        match create_sink(&self.stream, &path, self.volume) {
            Ok((sink, total)) => {
                if let Some(total) = total {
                    self.events.duration(duration_ms(total));
                }
                self.sink = Some(sink);
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    fn try_seek(&mut self, ms: u64) -> Result<(), EngineError> {
        if let Some(sink) = self.sink.as_ref() {
            sink.try_seek(Duration::from_millis(ms))?;
        }
        Ok(())
    }
}

impl PlaybackEngine for RodioEngine {
    fn set_source(&mut self, path: &Path) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.state = EngineState::Stopped;
        self.source = Some(path.to_path_buf());
        self.events.reset_source();
        self.events.position(0);

        debug!("engine source set to {}", path.display());
        if self.ensure_sink() {
            self.events.status(MediaStatus::Loaded);
        }
    }

    fn play(&mut self) {
        if self.state == EngineState::Playing || !self.ensure_sink() {
            return;
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.play();
            self.state = EngineState::Playing;
            self.events.status(MediaStatus::Buffered);
        }
    }

    fn pause(&mut self) {
        if self.state == EngineState::Paused || !self.ensure_sink() {
            return;
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
            self.state = EngineState::Paused;
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        if self.state != EngineState::Stopped {
            self.state = EngineState::Stopped;
            if self.events.current_status() == MediaStatus::Buffered {
                self.events.status(MediaStatus::Loaded);
            }
        }
        self.events.position(0);
    }

    fn set_position(&mut self, ms: u64) {
        match self.try_seek(ms) {
            Ok(()) => {
                if self.sink.is_some() {
                    self.events.position(ms);
                }
            }
            Err(e) => warn!("playback engine: {e}"),
        }
    }

    fn state(&self) -> EngineState {
        self.state
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        if let Some(sink) = self.sink.as_ref() {
            self.events.position(duration_ms(sink.get_pos()));

            if self.state == EngineState::Playing && sink.empty() {
                self.sink = None;
                self.state = EngineState::Stopped;
                self.events.status(MediaStatus::EndOfMedia);
            }
        }
        self.events.drain()
    }
}
