//! Bookkeeping for engine notifications.
//!
//! The engine is polled rather than called back, so it records what it
//! last reported and only queues an event when a value actually changes.

use super::types::{EngineEvent, MediaStatus};

#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    pending: Vec<EngineEvent>,
    position_ms: Option<u64>,
    duration_ms: Option<u64>,
    status: MediaStatus,
}

impl EventQueue {
    pub(crate) fn position(&mut self, ms: u64) {
        if self.position_ms != Some(ms) {
            self.position_ms = Some(ms);
            self.pending.push(EngineEvent::PositionChanged(ms));
        }
    }

    pub(crate) fn duration(&mut self, ms: u64) {
        if self.duration_ms != Some(ms) {
            self.duration_ms = Some(ms);
            self.pending.push(EngineEvent::DurationChanged(ms));
        }
    }

    pub(crate) fn status(&mut self, status: MediaStatus) {
        if self.status != status {
            self.status = status;
            self.pending.push(EngineEvent::MediaStatusChanged(status));
        }
    }

    /// Forget the reported position and duration so a new source reports both afresh.
    pub(crate) fn reset_source(&mut self) {
        self.position_ms = None;
        self.duration_ms = None;
    }

    pub(crate) fn current_status(&self) -> MediaStatus {
        self.status
    }

    pub(crate) fn drain(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending)
    }
}
