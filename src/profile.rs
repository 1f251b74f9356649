//! Size profiles and the bounding boxes they resolve to.
//!
//! A [`SizeProfile`] names the envelope the output must fit within. The
//! presets match common display resolutions; [`SizeProfile::Custom`] takes
//! any box. Each profile resolves to a [`BoundingBox`] at pipeline entry.

use std::str::FromStr;

/// Maximum (width, height) envelope the output must fit within.
///
/// Both dimensions must be positive; the pipeline rejects a zero dimension
/// before touching the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub max_width: u32,
    pub max_height: u32,
}

impl BoundingBox {
    /// Clamp value for square sources: the box width.
    pub fn square_max(self) -> u32 {
        self.max_width
    }
}

/// Named compression envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeProfile {
    /// 1280×720
    Hd,
    /// 1920×1080
    FullHd,
    /// 2560×1440
    QuadHd,
    /// Caller-supplied box.
    Custom { max_width: u32, max_height: u32 },
}

impl SizeProfile {
    pub fn bounding_box(self) -> BoundingBox {
        match self {
            SizeProfile::Hd => BoundingBox {
                max_width: 1280,
                max_height: 720,
            },
            SizeProfile::FullHd => BoundingBox {
                max_width: 1920,
                max_height: 1080,
            },
            SizeProfile::QuadHd => BoundingBox {
                max_width: 2560,
                max_height: 1440,
            },
            SizeProfile::Custom {
                max_width,
                max_height,
            } => BoundingBox {
                max_width,
                max_height,
            },
        }
    }
}

/// Parses `hd`, `full-hd`, `quad-hd`, or `WIDTHxHEIGHT` (e.g. `1600x900`).
///
/// Custom dimensions are not validated here; the pipeline rejects zero
/// dimensions so the error surfaces the same way for CLI and library callers.
impl FromStr for SizeProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hd" => Ok(SizeProfile::Hd),
            "full-hd" | "fullhd" => Ok(SizeProfile::FullHd),
            "quad-hd" | "quadhd" => Ok(SizeProfile::QuadHd),
            other => {
                let (w, h) = other.split_once('x').ok_or_else(|| {
                    format!("unknown size profile '{s}' (expected hd, full-hd, quad-hd, or WIDTHxHEIGHT)")
                })?;
                let max_width = w
                    .parse::<u32>()
                    .map_err(|_| format!("invalid width in size profile '{s}'"))?;
                let max_height = h
                    .parse::<u32>()
                    .map_err(|_| format!("invalid height in size profile '{s}'"))?;
                Ok(SizeProfile::Custom {
                    max_width,
                    max_height,
                })
            }
        }
    }
}
