use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures inside the rodio-backed engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("seek failed: {0}")]
    Seek(#[from] rodio::source::SeekError),
}
