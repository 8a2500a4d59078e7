//! Channel codec: color pixels to sample planes and back.
//!
//! The convolution engine is channel-agnostic; this module is the
//! boundary between packed 8-bit RGB pixels and the real-valued
//! [`Plane`]s the engine operates on. Round-tripping through
//! [`merge_scaled`] quantizes and is lossy by design.

use image::{GrayImage, Luma, RgbImage};

use crate::plane::{Plane, quantize};
use crate::types::PipelineError;

/// Split a color image into red, green, and blue sample planes.
///
/// Each 8-bit channel value becomes one `f64` sample; the three planes
/// share the source image's dimensions.
#[must_use = "returns the per-channel planes"]
pub fn split_channels(image: &RgbImage) -> [Plane; 3] {
    std::array::from_fn(|channel| {
        Plane::from_fn(image.width(), image.height(), |x, y| {
            f64::from(image.get_pixel(x, y).0[channel])
        })
    })
}

/// Element-wise sum of three equally-sized planes.
///
/// # Errors
///
/// Returns [`PipelineError::DimensionMismatch`] if any plane disagrees
/// with the first plane's dimensions.
pub fn sum_channels(a: &Plane, b: &Plane, c: &Plane) -> Result<Plane, PipelineError> {
    for other in [b, c] {
        if other.dimensions() != a.dimensions() {
            return Err(PipelineError::DimensionMismatch {
                expected: a.dimensions(),
                actual: other.dimensions(),
            });
        }
    }
    Ok(Plane::from_fn(a.width(), a.height(), |x, y| {
        a.get(x, y) + b.get(x, y) + c.get(x, y)
    }))
}

/// Render a plane back into a grayscale image with a linear transform.
///
/// Each sample becomes `quantize(value * scale + offset)`: rounded,
/// clamped to `[0, 255]`, and written as a single gray level. Used to
/// redisplay convolution output as an image, e.g. after smoothing.
#[must_use = "returns the rendered grayscale image"]
pub fn merge_scaled(plane: &Plane, scale: f64, offset: f64) -> GrayImage {
    GrayImage::from_fn(plane.width(), plane.height(), |x, y| {
        Luma([quantize(plane.get(x, y).mul_add(scale, offset))])
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn split_extracts_independent_channels() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([10 + x as u8, 20 + y as u8, 30]));
        let [red, green, blue] = split_channels(&img);

        assert_eq!(red.dimensions(), green.dimensions());
        assert_eq!(green.dimensions(), blue.dimensions());
        assert_eq!(red.get(2, 0), 12.0);
        assert_eq!(green.get(0, 1), 21.0);
        assert!(blue.samples().iter().all(|&s| s == 30.0));
    }

    #[test]
    fn split_dimensions_match_source() {
        let img = RgbImage::new(17, 31);
        let [red, _, _] = split_channels(&img);
        assert_eq!(red.width(), 17);
        assert_eq!(red.height(), 31);
    }

    #[test]
    fn sum_is_element_wise() {
        let a = Plane::filled(2, 2, 1.0);
        let b = Plane::filled(2, 2, 2.5);
        let c = Plane::from_fn(2, 2, |x, _| f64::from(x));
        let sum = sum_channels(&a, &b, &c).unwrap();
        assert_eq!(sum.get(0, 0), 3.5);
        assert_eq!(sum.get(1, 1), 4.5);
    }

    #[test]
    fn sum_mismatched_dimensions_is_error() {
        let a = Plane::filled(2, 2, 0.0);
        let b = Plane::filled(2, 3, 0.0);
        let c = Plane::filled(2, 2, 0.0);
        let result = sum_channels(&a, &b, &c);
        assert!(matches!(
            result,
            Err(PipelineError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn sum_mismatch_in_third_plane_is_error() {
        let a = Plane::filled(4, 4, 0.0);
        let b = Plane::filled(4, 4, 0.0);
        let c = Plane::filled(3, 4, 0.0);
        assert!(sum_channels(&a, &b, &c).is_err());
    }

    #[test]
    fn merge_scaled_applies_scale_and_offset() {
        let plane = Plane::filled(2, 2, 100.0);
        let img = merge_scaled(&plane, 0.5, 10.0);
        assert_eq!(img.get_pixel(0, 0).0[0], 60);
    }

    #[test]
    fn merge_scaled_clamps_both_ends() {
        let plane = Plane::from_fn(2, 1, |x, _| if x == 0 { -40.0 } else { 400.0 });
        let img = merge_scaled(&plane, 1.0, 0.0);
        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert_eq!(img.get_pixel(1, 0).0[0], 255);
    }

    #[test]
    fn merge_scaled_rounds_half_up() {
        let plane = Plane::filled(1, 1, 127.5);
        let img = merge_scaled(&plane, 1.0, 0.0);
        assert_eq!(img.get_pixel(0, 0).0[0], 128);
    }
}
