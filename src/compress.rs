//! The compression pipeline: probe → size → decode → resample → rotate.
//!
//! [`compress`] runs the pipeline and returns the finished buffer;
//! [`compress_and_save`] additionally persists it through the backend.
//! Sizing is two-stage: [`target_dimensions`](crate::calculations::target_dimensions)
//! applies the orientation-aware caps (a pre-filter that may ignore aspect
//! ratio when both dimensions blow the box), then
//! [`fit_dimensions`](crate::calculations::fit_dimensions) re-derives the
//! aspect-correct output geometry the buffer actually gets.

use crate::backend::{BackendError, ImageBackend};
use crate::calculations::{fit_dimensions, subsample_factor, target_dimensions};
use crate::orient::Rotation;
use crate::profile::SizeProfile;
use image::RgbaImage;
use image::imageops::{self, FilterType};
use log::debug;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("decode failed: {0}")]
    DecodeFailure(String),
    #[error("not enough memory for a {width}x{height} output buffer")]
    OutOfMemory { width: u32, height: u32 },
    #[error("encode failed: {0}")]
    EncodeFailure(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BackendError> for CompressError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Io(e) => CompressError::Io(e),
            BackendError::InvalidImage(msg) => CompressError::InvalidImage(msg),
            BackendError::Decode(msg) => CompressError::DecodeFailure(msg),
            BackendError::Encode(msg) => CompressError::EncodeFailure(msg),
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, CompressError>;

/// Compress a source image into the profile's envelope.
///
/// Returns the resampled, orientation-corrected RGBA buffer. The buffer is
/// exclusively owned; intermediate buffers are dropped as each stage hands
/// off to the next. Fails with [`CompressError::InvalidImage`] before any
/// file access when the profile's box has a zero dimension.
pub fn compress(
    backend: &impl ImageBackend,
    source: &Path,
    profile: SizeProfile,
) -> Result<RgbaImage> {
    let bbox = profile.bounding_box();
    if bbox.max_width == 0 || bbox.max_height == 0 {
        return Err(CompressError::InvalidImage(format!(
            "bounding box must be positive, got {}x{}",
            bbox.max_width, bbox.max_height
        )));
    }

    let actual = backend.identify(source)?;
    if actual.width == 0 || actual.height == 0 {
        return Err(CompressError::InvalidImage(format!(
            "{}: zero-area source ({}x{})",
            source.display(),
            actual.width,
            actual.height
        )));
    }

    let file_size = backend.file_size(source)?;
    let requested = target_dimensions(actual, file_size, bbox);
    let (fit_w, fit_h) = fit_dimensions(actual, requested);
    let factor = subsample_factor(actual, (fit_w, fit_h));
    debug!(
        "{}: {}x{} ({file_size} bytes) -> requested {}x{}, fit {fit_w}x{fit_h}, subsample 1/{factor}",
        source.display(),
        actual.width,
        actual.height,
        requested.0,
        requested.1,
    );

    // The output buffer is the one allocation that can plausibly exhaust
    // memory; probe it before decoding so failure is typed, not an abort.
    reserve_output(fit_w, fit_h)?;

    let working = backend.decode_at(source, factor)?;
    let (decoded_w, decoded_h) = working.dimensions();

    // Scale ratio fit/decoded about the buffer center: the working buffer
    // maps exactly onto the output surface.
    let output = if (decoded_w, decoded_h) == (fit_w, fit_h) {
        working
    } else {
        imageops::resize(&working, fit_w, fit_h, FilterType::Triangle)
    };
    debug!(
        "{}: resampled {decoded_w}x{decoded_h} -> {}x{}",
        source.display(),
        output.width(),
        output.height()
    );

    let rotation = Rotation::from_exif_code(backend.exif_orientation(source));
    if !rotation.is_identity() {
        debug!("{}: correcting EXIF orientation with {rotation:?}", source.display());
    }
    Ok(rotation.apply(output))
}

/// Compress, then persist through the backend.
///
/// The output format follows the destination extension (`png` lossless,
/// everything else JPEG at maximum quality). On a failed write the buffer
/// is dropped with the error; the destination only counts as written when
/// the whole call succeeds.
pub fn compress_and_save(
    backend: &impl ImageBackend,
    source: &Path,
    dest: &Path,
    profile: SizeProfile,
) -> Result<RgbaImage> {
    let image = compress(backend, source, profile)?;
    backend.save(&image, dest)?;
    Ok(image)
}

/// Verify an RGBA buffer of the given geometry is allocatable.
fn reserve_output(width: u32, height: u32) -> Result<()> {
    let len = width as usize * height as usize * 4;
    let mut probe: Vec<u8> = Vec::new();
    probe
        .try_reserve_exact(len)
        .map_err(|_| CompressError::OutOfMemory { width, height })?;
    Ok(())
}
