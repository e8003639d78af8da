use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::config::CoverSettings;

use super::codec::{ImageCodec, ImageCrateCodec};
use super::model::{Cover, CoverSource, TrackInfo};
use super::tags::{LoftyTagReader, TagData, TagReader};
use super::{COVER_FILE_NAMES, COVER_SIZE, PLACEHOLDER_RGBA};

/// How covers are looked up and sized.
#[derive(Debug, Clone)]
pub struct CoverPolicy {
    pub size: u32,
    /// Sibling file names tried in order.
    pub file_names: Vec<String>,
}

impl Default for CoverPolicy {
    fn default() -> Self {
        Self {
            size: COVER_SIZE,
            file_names: COVER_FILE_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl From<&CoverSettings> for CoverPolicy {
    fn from(settings: &CoverSettings) -> Self {
        Self {
            size: settings.size.max(1),
            file_names: settings.file_names.clone(),
        }
    }
}

pub struct Resolver {
    tags: Box<dyn TagReader>,
    codec: Box<dyn ImageCodec>,
    policy: CoverPolicy,
}

impl Resolver {
    pub fn new(tags: Box<dyn TagReader>, codec: Box<dyn ImageCodec>, policy: CoverPolicy) -> Self {
        Self {
            tags,
            codec,
            policy,
        }
    }

    /// Resolver using `lofty` for tags and the `image` crate for covers.
    pub fn with_policy(policy: CoverPolicy) -> Self {
        Self::new(Box::new(LoftyTagReader), Box::new(ImageCrateCodec), policy)
    }

    /// Resolve the title and cover for `path`. Never fails.
    pub fn resolve(&self, path: &Path) -> TrackInfo {
        let tags = self.read_tags(path, true);
        let title = title_or_stem(tags.as_ref(), path);

        let cover = tags
            .as_ref()
            .and_then(|t| self.embedded_cover(t))
            .or_else(|| self.sibling_cover(path))
            .unwrap_or_else(|| self.placeholder());

        TrackInfo { title, cover }
    }

    /// The title alone, as listed in the playlist.
    pub fn display_name(&self, path: &Path) -> String {
        title_or_stem(self.read_tags(path, false).as_ref(), path)
    }

    pub fn placeholder(&self) -> Cover {
        let size = self.policy.size;
        Cover {
            source: CoverSource::Placeholder,
            image: RgbaImage::from_pixel(size, size, Rgba(PLACEHOLDER_RGBA)),
        }
    }

    fn read_tags(&self, path: &Path, pictures: bool) -> Option<TagData> {
        match self.tags.read_tags(path, pictures) {
            Ok(tags) => Some(tags),
            Err(e) => {
                debug!("no tags for {}: {e}", path.display());
                None
            }
        }
    }

    fn embedded_cover(&self, tags: &TagData) -> Option<Cover> {
        let picture = tags.pictures.first()?;
        match self.codec.decode(&picture.data) {
            Ok(image) => Some(Cover {
                source: CoverSource::Embedded,
                image: self.codec.square(image, self.policy.size),
            }),
            Err(e) => {
                debug!("embedded picture unusable: {e}");
                None
            }
        }
    }

    fn sibling_cover(&self, path: &Path) -> Option<Cover> {
        let dir = path.parent()?;
        self.policy
            .file_names
            .iter()
            .map(|name| dir.join(name))
            .filter(|candidate| candidate.is_file())
            .find_map(|candidate| self.open_cover_file(candidate))
    }

    fn open_cover_file(&self, candidate: PathBuf) -> Option<Cover> {
        match self.codec.open(&candidate) {
            Ok(image) => Some(Cover {
                image: self.codec.square(image, self.policy.size),
                source: CoverSource::File(candidate),
            }),
            Err(e) => {
                debug!("cover file {} unusable: {e}", candidate.display());
                None
            }
        }
    }
}

fn title_or_stem(tags: Option<&TagData>, path: &Path) -> String {
    tags.and_then(|t| t.title.as_deref())
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| file_stem(path))
}

/// The file's base name without its extension.
pub(super) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
