use std::path::PathBuf;

use image::RgbaImage;

/// Where a cover image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSource {
    Embedded,
    File(PathBuf),
    Placeholder,
}

/// A square, display-ready cover image.
#[derive(Debug, Clone)]
pub struct Cover {
    pub source: CoverSource,
    pub image: RgbaImage,
}

impl Cover {
    pub fn is_placeholder(&self) -> bool {
        self.source == CoverSource::Placeholder
    }
}

/// What the UI shows for the loaded track. Recomputed on every load.
#[derive(Debug, Clone)]
pub struct TrackInfo {
    pub title: String,
    pub cover: Cover,
}
