//! rinkaku-pipeline: Pure convolution and edge-detection core (sans-IO).
//!
//! Implements 2D convolution from scratch -- valid and zero-padded
//! modes, cascaded application, per-channel RGB composition -- and a
//! fixed-kernel edge detector (Sobel, horizontal, vertical) built on
//! top of it:
//!
//! decode -> split channels -> convolve x3 -> sum -> clamp.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. Filesystem interaction
//! (reading the source, writing `edges<N>.png` outputs) lives in
//! `rinkaku-io`.
//!
//! For reuse outside edge detection (e.g. smoothing before
//! resampling), [`convolve::convolve_padded`] and [`plane::quantize`]
//! are the stable entry points.

pub mod channel;
pub mod convolve;
pub mod diagnostics;
pub mod edge;
pub mod kernel;
pub mod plane;
pub mod types;

pub use convolve::convolve_padded;
pub use diagnostics::FilterDiagnostics;
pub use kernel::{FilterKind, Kernel};
pub use plane::{Plane, quantize};
pub use types::{DetectorConfig, Dimensions, GrayImage, PipelineError, RgbImage};

/// Decode raw image bytes into an RGB image.
///
/// Supports whatever container formats the `image` crate is built with
/// (PNG, JPEG, BMP here). Alpha, if present, is dropped.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgb8())
}

/// Run one filter's edge detection against raw image bytes.
///
/// Decodes the image, then runs the detection chain with the
/// configured number of same-size convolution passes. The returned
/// edge map has the source image's dimensions.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] or
/// [`PipelineError::ImageDecode`] for undecodable input, and
/// [`PipelineError::BoundsViolation`] if the image is smaller than the
/// 3x3 kernel.
pub fn process(
    image_bytes: &[u8],
    filter: FilterKind,
    config: &DetectorConfig,
) -> Result<GrayImage, PipelineError> {
    let image = decode_rgb(image_bytes)?;
    edge::detect_edges_with(&image, filter, config.iterations)
}
