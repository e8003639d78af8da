//! Tag reading backed by `lofty`.

use std::path::Path;

use lofty::config::ParseOptions;
use lofty::error::LoftyError;
use lofty::file::TaggedFileExt;
use lofty::prelude::Accessor;
use lofty::probe::Probe;
use lofty::tag::Tag;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("failed to read tags: {0}")]
    Lofty(#[from] LoftyError),
}

/// One attached picture frame.
#[derive(Debug, Clone)]
pub struct PictureFrame {
    pub data: Vec<u8>,
}

/// The subset of a file's tags the player cares about.
#[derive(Debug, Clone, Default)]
pub struct TagData {
    pub title: Option<String>,
    /// Attached pictures in tag order, primary tag first.
    pub pictures: Vec<PictureFrame>,
}

pub trait TagReader {
    /// Read `path`'s tags. Picture payloads are only loaded when `pictures` is set.
    fn read_tags(&self, path: &Path, pictures: bool) -> Result<TagData, TagError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagReader;

impl TagReader for LoftyTagReader {
    fn read_tags(&self, path: &Path, pictures: bool) -> Result<TagData, TagError> {
        let options = ParseOptions::new()
            .read_properties(false)
            .read_cover_art(pictures);
        let tagged = Probe::open(path)?.options(options).read()?;

        // Primary tag first, then whatever else the container carries.
        let mut ordered: Vec<&Tag> = Vec::new();
        if let Some(primary) = tagged.primary_tag() {
            ordered.push(primary);
        }
        for tag in tagged.tags() {
            if !ordered.iter().any(|t| std::ptr::eq(*t, tag)) {
                ordered.push(tag);
            }
        }

        let title = ordered
            .iter()
            .filter_map(|tag| tag.title().map(|v| v.into_owned()))
            .find(|v| !v.trim().is_empty());

        let pictures = if pictures {
            ordered
                .iter()
                .flat_map(|tag| tag.pictures())
                .map(|p| PictureFrame {
                    data: p.data().to_vec(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(TagData { title, pictures })
    }
}
