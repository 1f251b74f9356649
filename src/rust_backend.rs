//! Production image backend — pure Rust, statically linked.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only, no pixels) |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate decoders |
//! | Subsampled decode | full decode + `imageops::resize` (Triangle) |
//! | EXIF orientation | `exif::Reader` (kamadak-exif) |
//! | Encode → PNG | `PngEncoder`, best compression |
//! | Encode → JPEG | `JpegEncoder`, quality 100 |

use crate::backend::{BackendError, Dimensions, ImageBackend};
use image::codecs::{jpeg, png};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader, RgbaImage};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::InvalidImage(format!("unreadable header in {}: {e}", path.display()))
        })?;
        if width == 0 || height == 0 {
            return Err(BackendError::InvalidImage(format!(
                "{}: zero-area image ({width}x{height})",
                path.display()
            )));
        }
        Ok(Dimensions { width, height })
    }

    fn file_size(&self, path: &Path) -> Result<u64, BackendError> {
        Ok(std::fs::metadata(path)?.len())
    }

    fn decode_at(&self, path: &Path, factor: u32) -> Result<RgbaImage, BackendError> {
        let img = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .decode()
            .map_err(|e| {
                BackendError::Decode(format!("failed to decode {}: {e}", path.display()))
            })?;
        let rgba = img.into_rgba8();
        if factor <= 1 {
            return Ok(rgba);
        }

        let (w, h) = rgba.dimensions();
        let sub_w = (w / factor).max(1);
        let sub_h = (h / factor).max(1);
        debug!(
            "{}: decoded {w}x{h}, reducing 1/{factor} -> {sub_w}x{sub_h}",
            path.display()
        );
        Ok(imageops::resize(&rgba, sub_w, sub_h, FilterType::Triangle))
    }

    fn exif_orientation(&self, path: &Path) -> u32 {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("EXIF read failed for {}: {e}", path.display());
                return 0;
            }
        };
        let mut reader = BufReader::new(file);
        match exif::Reader::new().read_from_container(&mut reader) {
            Ok(data) => data
                .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
                .unwrap_or(0),
            Err(e) => {
                // Plenty of valid sources simply carry no EXIF block.
                debug!("no EXIF orientation in {}: {e}", path.display());
                0
            }
        }
    }

    fn save(&self, image: &RgbaImage, path: &Path) -> Result<(), BackendError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let file = File::create(path).map_err(BackendError::Io)?;
        let writer = BufWriter::new(file);

        match ext.as_str() {
            "png" => {
                let encoder = png::PngEncoder::new_with_quality(
                    writer,
                    png::CompressionType::Best,
                    png::FilterType::Adaptive,
                );
                image.write_with_encoder(encoder).map_err(|e| {
                    BackendError::Encode(format!("PNG encode to {} failed: {e}", path.display()))
                })
            }
            // jpg, jpeg, and anything unrecognized all get maximum-quality
            // JPEG; the alpha channel is flattened away first.
            _ => {
                let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
                let encoder = jpeg::JpegEncoder::new_with_quality(writer, 100);
                rgb.write_with_encoder(encoder).map_err(|e| {
                    BackendError::Encode(format!("JPEG encode to {} failed: {e}", path.display()))
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, RgbImage};

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = File::create(path).unwrap();
        let writer = BufWriter::new(file);
        jpeg::JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let dims = backend.identify(&path).unwrap();
        assert_eq!(dims.width, 200);
        assert_eq!(dims.height, 150);
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let backend = RustBackend::new();
        let result = backend.identify(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::InvalidImage(_))));
    }

    #[test]
    fn file_size_matches_metadata() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 64, 48);

        let backend = RustBackend::new();
        let size = backend.file_size(&path).unwrap();
        assert_eq!(size, std::fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn decode_at_one_keeps_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let buffer = backend.decode_at(&path, 1).unwrap();
        assert_eq!(buffer.dimensions(), (200, 150));
    }

    #[test]
    fn decode_at_factor_reduces_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 400, 300);

        let backend = RustBackend::new();
        let buffer = backend.decode_at(&path, 4).unwrap();
        assert_eq!(buffer.dimensions(), (100, 75));
    }

    #[test]
    fn decode_at_huge_factor_floors_at_one_pixel() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 10, 10);

        let backend = RustBackend::new();
        let buffer = backend.decode_at(&path, 100).unwrap();
        assert_eq!(buffer.dimensions(), (1, 1));
    }

    #[test]
    fn exif_orientation_defaults_to_zero() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 64, 48);

        let backend = RustBackend::new();
        // Synthetic JPEG carries no EXIF block; missing file is also 0.
        assert_eq!(backend.exif_orientation(&path), 0);
        assert_eq!(backend.exif_orientation(Path::new("/nonexistent.jpg")), 0);
    }

    #[test]
    fn save_png_roundtrips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");

        let backend = RustBackend::new();
        let buffer = RgbaImage::new(120, 80);
        backend.save(&buffer, &path).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (120, 80));
    }

    #[test]
    fn save_jpeg_roundtrips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.jpg");

        let backend = RustBackend::new();
        let buffer = RgbaImage::new(90, 60);
        backend.save(&buffer, &path).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (90, 60));
    }

    #[test]
    fn save_unknown_extension_falls_back_to_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.raw");

        let backend = RustBackend::new();
        let buffer = RgbaImage::new(30, 20);
        backend.save(&buffer, &path).unwrap();

        // Content is JPEG regardless of the extension.
        let dims = ImageReader::open(&path)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .into_dimensions()
            .unwrap();
        assert_eq!(dims, (30, 20));
    }
}
