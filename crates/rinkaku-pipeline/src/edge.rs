//! Fixed-kernel edge detection over RGB images.
//!
//! One filter run is a linear stage chain:
//! split channels -> same-size convolution per channel -> magnitude ->
//! sum -> clamp. The output is a grayscale edge map with the source
//! image's dimensions.
//!
//! The response is treated as a magnitude: negative convolution samples
//! are sign-flipped before the channels are combined, so an edge lights
//! up regardless of gradient direction. This is a deliberate departure
//! from signed clamping and must not be "fixed".

use std::time::Instant;

use image::{GrayImage, Luma, RgbImage};

use crate::channel::{split_channels, sum_channels};
use crate::convolve::iterate_padded;
use crate::diagnostics::FilterDiagnostics;
use crate::kernel::FilterKind;
use crate::plane::Plane;
use crate::types::{DetectorConfig, PipelineError};

/// Clamp a summed edge response into a pixel value.
///
/// Sign-flips negative values, then clamps to 255 and truncates the
/// fraction. Unlike [`quantize`](crate::plane::quantize) this does not
/// round; the truncating conversion is part of the reference response.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fix_out_of_range(value: f64) -> u8 {
    let magnitude = value.abs();
    if magnitude > 255.0 { 255 } else { magnitude as u8 }
}

/// Sign-flip every sample so the plane holds response magnitudes.
fn magnitude(plane: &Plane) -> Plane {
    Plane::from_fn(plane.width(), plane.height(), |x, y| plane.get(x, y).abs())
}

/// Detect edges with the given catalog filter, single pass.
///
/// # Errors
///
/// Returns [`PipelineError::BoundsViolation`] if the source image is
/// smaller than the 3x3 kernel in either dimension.
pub fn detect_edges(image: &RgbImage, filter: FilterKind) -> Result<GrayImage, PipelineError> {
    detect_edges_with(image, filter, DetectorConfig::DEFAULT_ITERATIONS)
}

/// Detect edges with an explicit number of convolution passes.
///
/// Each channel is convolved with the filter's kernel using the
/// same-size (zero-padded) cascade, sign-flipped into magnitudes,
/// summed across channels, and clamped per sample.
///
/// # Errors
///
/// Returns [`PipelineError::BoundsViolation`] if the source image is
/// smaller than the 3x3 kernel in either dimension.
pub fn detect_edges_with(
    image: &RgbImage,
    filter: FilterKind,
    iterations: u32,
) -> Result<GrayImage, PipelineError> {
    let kernel = filter.kernel();
    let [red, green, blue] = split_channels(image);

    let red = magnitude(&iterate_padded(&red, &kernel, iterations)?);
    let green = magnitude(&iterate_padded(&green, &kernel, iterations)?);
    let blue = magnitude(&iterate_padded(&blue, &kernel, iterations)?);

    let summed = sum_channels(&red, &green, &blue)?;
    Ok(render(&summed))
}

/// Like [`detect_edges_with`], also collecting per-stage timings.
///
/// # Errors
///
/// Returns [`PipelineError::BoundsViolation`] if the source image is
/// smaller than the 3x3 kernel in either dimension.
pub fn detect_edges_timed(
    image: &RgbImage,
    filter: FilterKind,
    iterations: u32,
) -> Result<(GrayImage, FilterDiagnostics), PipelineError> {
    let kernel = filter.kernel();
    let start = Instant::now();

    let split_start = Instant::now();
    let [red, green, blue] = split_channels(image);
    let split = split_start.elapsed();

    let convolve_start = Instant::now();
    let red = magnitude(&iterate_padded(&red, &kernel, iterations)?);
    let green = magnitude(&iterate_padded(&green, &kernel, iterations)?);
    let blue = magnitude(&iterate_padded(&blue, &kernel, iterations)?);
    let convolve = convolve_start.elapsed();

    let sum_start = Instant::now();
    let summed = sum_channels(&red, &green, &blue)?;
    let sum = sum_start.elapsed();

    let clamp_start = Instant::now();
    let edges = render(&summed);
    let clamp = clamp_start.elapsed();

    let diagnostics = FilterDiagnostics {
        filter,
        dimensions: summed.dimensions(),
        split,
        convolve,
        sum,
        clamp,
        total: start.elapsed(),
    };
    Ok((edges, diagnostics))
}

/// Clamp every sample of the summed response into a grayscale image.
fn render(summed: &Plane) -> GrayImage {
    GrayImage::from_fn(summed.width(), summed.height(), |x, y| {
        Luma([fix_out_of_range(summed.get(x, y))])
    })
}
