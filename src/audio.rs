//! Audio playback: the engine capability, its events and the rodio backend.

mod error;
mod events;
mod player;
mod sink;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use error::EngineError;
pub use player::RodioEngine;
pub use types::{EngineEvent, EngineState, MediaStatus, PlaybackEngine};
