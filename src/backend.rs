//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the sizing pipeline and
//! the pixel/file work: probing bounds, reading the source byte size,
//! materializing pixels at a reduction factor, reading the EXIF orientation
//! code, and persisting a finished buffer.
//!
//! The production implementation is
//! [`RustBackend`](crate::rust_backend::RustBackend). Tests use a mock that
//! records operations, so pipeline logic is exercised without decoding a
//! single pixel.

use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Source bounds, probed without materializing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image backends.
///
/// Every backend must implement all five operations so the pipeline is
/// backend-agnostic. `exif_orientation` is deliberately infallible: a
/// missing or unreadable EXIF block degrades to "no rotation" rather than
/// failing the pipeline.
pub trait ImageBackend: Sync {
    /// Probe image bounds without loading pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Source file size in bytes.
    fn file_size(&self, path: &Path) -> Result<u64, BackendError>;

    /// Materialize pixels reduced by `factor`.
    ///
    /// The factor is advisory; the returned buffer may have dimensions only
    /// approximately `original / factor`.
    fn decode_at(&self, path: &Path, factor: u32) -> Result<RgbaImage, BackendError>;

    /// Raw EXIF orientation code, or 0 when absent or unreadable.
    fn exif_orientation(&self, path: &Path) -> u32;

    /// Encode and write a buffer, choosing the format from the destination
    /// extension.
    fn save(&self, image: &RgbaImage, path: &Path) -> Result<(), BackendError>;
}
