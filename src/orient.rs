//! EXIF-driven rotation correction.
//!
//! Cameras record physical rotation in the EXIF orientation tag instead of
//! rotating pixels at capture time. The pipeline corrects the three pure
//! rotations; mirrored variants and unknown codes pass through untouched.

use image::RgbaImage;
use image::imageops;

/// Rotation that corrects a source's recorded physical orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Map a raw EXIF orientation code: 6 → 90° cw, 3 → 180°, 8 → 270° cw.
    /// Every other code (absent, 0, or a mirrored variant) is a no-op.
    pub fn from_exif_code(code: u32) -> Self {
        match code {
            6 => Rotation::Cw90,
            3 => Rotation::Cw180,
            8 => Rotation::Cw270,
            _ => Rotation::None,
        }
    }

    pub fn is_identity(self) -> bool {
        matches!(self, Rotation::None)
    }

    /// Re-render the buffer at the rotated geometry.
    ///
    /// Width and height swap for the quarter turns; every pixel is
    /// preserved, nothing is cropped.
    pub fn apply(self, image: RgbaImage) -> RgbaImage {
        match self {
            Rotation::None => image,
            Rotation::Cw90 => imageops::rotate90(&image),
            Rotation::Cw180 => imageops::rotate180(&image),
            Rotation::Cw270 => imageops::rotate270(&image),
        }
    }
}
