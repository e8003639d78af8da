//! Image decoding and resizing backed by the `image` crate.

use std::io;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader, RgbaImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverError {
    #[error("failed to read image file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] ImageError),
}

pub trait ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CoverError>;

    fn open(&self, path: &Path) -> Result<DynamicImage, CoverError>;

    /// Force `image` to `size x size`. Aspect ratio is not preserved.
    fn square(&self, image: DynamicImage, size: u32) -> RgbaImage {
        image
            .resize_exact(size, size, FilterType::Triangle)
            .to_rgba8()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateCodec;

impl ImageCodec for ImageCrateCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CoverError> {
        Ok(image::load_from_memory(bytes)?)
    }

    fn open(&self, path: &Path) -> Result<DynamicImage, CoverError> {
        // Sniff the content: `cover.jpg` files that are really PNGs are common.
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        Ok(reader.decode()?)
    }
}
