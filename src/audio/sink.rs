//! Utilities for creating `rodio` sinks from file paths.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` for it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::error::EngineError;

pub(super) type FileDecoder = Decoder<BufReader<File>>;

/// Open and probe `path` with rodio's decoder.
///
/// Built from the `File` itself so the decoder knows the byte length and
/// may seek in both directions.
pub(super) fn open_decoder(path: &Path) -> Result<FileDecoder, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::try_from(file).map_err(|source| EngineError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a paused `Sink` for `path` at the given volume.
///
/// Returns the sink together with the total duration when the decoder knows it.
pub(super) fn create_sink(
    stream: &OutputStream,
    path: &Path,
    volume: f32,
) -> Result<(Sink, Option<Duration>), EngineError> {
    let source = open_decoder(path)?;
    let total = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok((sink, total))
}

pub(super) fn duration_ms(d: Duration) -> u64 {
    d.as_millis().min(u64::MAX as u128) as u64
}
