//! # pixfit
//!
//! Shrink photographs into a bounded envelope — HD, Full HD, Quad HD, or a
//! custom box — while preserving aspect ratio, bounding decode memory, and
//! correcting EXIF-recorded rotation.
//!
//! # Pipeline
//!
//! Every compression request runs the same synchronous stages:
//!
//! ```text
//! 1. Identify    probe bounds from the header, no pixels
//! 2. Size        orientation-aware caps, then an aspect-correct fit
//! 3. Decode      materialize pixels at a memory-bounding subsample factor
//! 4. Resample    bilinear scale onto the fitted output buffer
//! 5. Rotate      correct the EXIF orientation (90/180/270)
//! 6. Save        optional; format chosen by destination extension
//! ```
//!
//! Buffers are exclusively owned and move stage to stage, so concurrent
//! requests on different images need no coordination.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`profile`] | Size profiles (HD / Full HD / Quad HD / custom) and bounding boxes |
//! | [`calculations`] | Pure dimension math: orientation, target policy, subsample factor, aspect fit |
//! | [`backend`] | [`ImageBackend`] trait, shared types, errors |
//! | [`rust_backend`] | Production backend on the `image` and `exif` crates |
//! | [`compress`] | The pipeline and its public operations |
//! | [`orient`] | EXIF rotation correction |
//!
//! # Design Decisions
//!
//! ## Two-Stage Sizing
//!
//! The target policy first caps a source against the (orientation-rotated)
//! box; when both dimensions exceed their caps it clamps to the bare box
//! without regard for aspect ratio. That clamp is only a pre-filter: the
//! fit stage re-derives the aspect-correct geometry the output buffer
//! actually gets. The fit compares an integer-truncated source ratio, which
//! biases near-square and portrait sources into the height-bound branch;
//! this geometry is long-established and deliberately kept, quirks and all.
//!
//! ## Memory-Bounded Decode
//!
//! Sources are never decoded at full resolution just to be thrown away. A
//! subsample factor derived from the fit dimensions keeps the decoded pixel
//! count within twice the requested pixel count, and the output allocation
//! is probed up front so exhaustion surfaces as a typed error instead of an
//! abort.
//!
//! ## Backend Seam
//!
//! All file and pixel work sits behind the [`ImageBackend`] trait so the
//! sizing pipeline is testable with a recording mock. The production
//! [`RustBackend`] is pure Rust — `image` for decode/encode, `kamadak-exif`
//! for the orientation tag — and statically linked.
//!
//! ## No Upscaling
//!
//! Sources smaller than the box, and files under 100 KiB, pass through at
//! their original geometry. The pipeline only ever shrinks.
//!
//! # Example
//!
//! ```no_run
//! use pixfit::{RustBackend, SizeProfile, compress_and_save};
//!
//! let backend = RustBackend::new();
//! let image = compress_and_save(
//!     &backend,
//!     "holiday.jpg".as_ref(),
//!     "holiday-small.jpg".as_ref(),
//!     SizeProfile::FullHd,
//! )?;
//! println!("saved {}x{}", image.width(), image.height());
//! # Ok::<(), pixfit::CompressError>(())
//! ```

pub mod backend;
pub mod calculations;
pub mod compress;
pub mod orient;
pub mod profile;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use compress::{CompressError, compress, compress_and_save};
pub use orient::Rotation;
pub use profile::{BoundingBox, SizeProfile};
pub use rust_backend::RustBackend;
