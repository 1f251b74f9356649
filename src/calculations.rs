//! Pure calculation functions for the sizing pipeline.
//!
//! All functions here are pure and testable without any I/O or pixel data.
//! They assume positive dimensions; zero-area sources are rejected at
//! pipeline entry before any of these run.

use crate::backend::Dimensions;
use crate::profile::BoundingBox;
use std::cmp::Ordering;

/// Source files under this many bytes keep their original dimensions.
pub const SMALL_FILE_THRESHOLD: u64 = 100 * 1024;

/// How a source's bounds relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

/// Classify source bounds.
///
/// # Examples
/// ```
/// use pixfit::backend::Dimensions;
/// use pixfit::calculations::{Orientation, classify};
///
/// let wide = Dimensions { width: 4000, height: 3000 };
/// assert_eq!(classify(wide), Orientation::Landscape);
/// ```
pub fn classify(dims: Dimensions) -> Orientation {
    match dims.width.cmp(&dims.height) {
        Ordering::Greater => Orientation::Landscape,
        Ordering::Less => Orientation::Portrait,
        Ordering::Equal => Orientation::Square,
    }
}

/// Compute the requested output dimensions for a source.
///
/// Sources under [`SMALL_FILE_THRESHOLD`] bytes pass through at their
/// original size regardless of the box. Larger sources are capped against
/// the box according to orientation: landscape uses the box as-is, portrait
/// uses it rotated (the box height caps the width and vice versa), and
/// square sources clamp to [`BoundingBox::square_max`].
///
/// When both dimensions exceed their caps the result is the bare box — a
/// hard cap that does not preserve aspect ratio. [`fit_dimensions`]
/// re-derives the aspect-correct size from this value afterwards.
pub fn target_dimensions(actual: Dimensions, file_size: u64, bbox: BoundingBox) -> (u32, u32) {
    if file_size < SMALL_FILE_THRESHOLD {
        return (actual.width, actual.height);
    }

    match classify(actual) {
        Orientation::Landscape => shrink_to_caps(actual, bbox.max_width, bbox.max_height),
        Orientation::Portrait => shrink_to_caps(actual, bbox.max_height, bbox.max_width),
        Orientation::Square => {
            let square_max = bbox.square_max();
            if actual.width >= square_max && actual.height >= square_max {
                (square_max, square_max)
            } else {
                (actual.width, actual.height)
            }
        }
    }
}

/// Cap `actual` against a width cap and a height cap.
///
/// Both exceed: bare caps (aspect deliberately not preserved). One exceeds:
/// the other dimension scales proportionally, truncating toward zero.
fn shrink_to_caps(actual: Dimensions, width_cap: u32, height_cap: u32) -> (u32, u32) {
    let (w, h) = (actual.width, actual.height);
    if w > width_cap && h > height_cap {
        (width_cap, height_cap)
    } else if w > width_cap {
        let scaled = (width_cap as f32 / w as f32 * h as f32) as u32;
        (width_cap, scaled)
    } else if h > height_cap {
        let scaled = (height_cap as f32 / h as f32 * w as f32) as u32;
        (scaled, height_cap)
    } else {
        (w, h)
    }
}

/// Decode-time reduction factor bounding peak decode memory.
///
/// Starts from the rounded per-axis ratios (whichever is smaller), then
/// grows until the decoded pixel count fits within twice the requested
/// pixel count. Never returns less than 1. The factor is advisory: the
/// decoder may produce dimensions only approximately `actual / factor`.
pub fn subsample_factor(actual: Dimensions, requested: (u32, u32)) -> u32 {
    let (req_w, req_h) = requested;
    let mut factor = 1u32;

    if actual.height > req_h || actual.width > req_w {
        let height_ratio = (actual.height as f32 / req_h as f32).round() as u32;
        let width_ratio = (actual.width as f32 / req_w as f32).round() as u32;
        factor = height_ratio.min(width_ratio).max(1);
    }

    let total_pixels = actual.width as f32 * actual.height as f32;
    let pixel_cap = req_w as f32 * req_h as f32 * 2.0;
    while total_pixels / (factor as f32 * factor as f32) > pixel_cap {
        factor += 1;
    }
    factor
}

/// Fit source bounds into the requested box, preserving aspect ratio.
///
/// Sources that exceed the box in either dimension are scaled down along
/// the binding axis; smaller sources pass through unchanged (no upscaling).
/// Proportional products truncate toward zero.
///
/// The source ratio truncates `width / height` to an integer before the
/// comparison, so near-square landscape sources compare as 1.0 and take the
/// height-bound branch even when their true ratio exceeds the box ratio.
/// Callers rely on the resulting geometry; do not "fix" the truncation.
pub fn fit_dimensions(actual: Dimensions, requested: (u32, u32)) -> (u32, u32) {
    let (req_w, req_h) = requested;
    let img_ratio = (actual.width / actual.height) as f32;
    let max_ratio = req_w as f32 / req_h as f32;

    if actual.height > req_h || actual.width > req_w {
        if img_ratio < max_ratio {
            let scale = req_h as f32 / actual.height as f32;
            ((scale * actual.width as f32) as u32, req_h)
        } else if img_ratio > max_ratio {
            let scale = req_w as f32 / actual.width as f32;
            (req_w, (scale * actual.height as f32) as u32)
        } else {
            (req_w, req_h)
        }
    } else {
        (actual.width, actual.height)
    }
}
