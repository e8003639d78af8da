//! Track title and cover-art resolution.
//!
//! Given an audio file, the `Resolver` produces the title shown in the UI
//! and a square cover image, consulting embedded tags first and then
//! conventional image files next to the track. Every failure falls through
//! to the next source; the last one is a flat placeholder.

mod codec;
mod model;
mod resolver;
mod tags;

pub use codec::{CoverError, ImageCodec, ImageCrateCodec};
pub use model::{Cover, CoverSource, TrackInfo};
pub use resolver::{CoverPolicy, Resolver};
pub use tags::{LoftyTagReader, PictureFrame, TagData, TagError, TagReader};

/// Audio file extensions accepted into the playlist.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp3", "wav", "flac", "ogg", "m4a"];

/// Conventional cover file names, in lookup order.
pub const COVER_FILE_NAMES: [&str; 5] = [
    "cover.jpg",
    "folder.jpg",
    "front.jpg",
    "cover.png",
    "folder.png",
];

/// Edge length of the square cover image.
pub const COVER_SIZE: u32 = 250;

/// Flat dark gray used when no cover can be found.
pub const PLACEHOLDER_RGBA: [u8; 4] = [128, 128, 128, 255];
