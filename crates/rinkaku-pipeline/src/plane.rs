//! Single-channel sample plane and pixel quantization.
//!
//! A [`Plane`] is a rectangular grid of `f64` samples stored in one
//! flat, row-major buffer. Planes are immutable after construction:
//! every pipeline stage produces a fresh plane rather than mutating
//! its input, so no shared mutable state crosses stage boundaries.

use crate::types::Dimensions;

/// A `width x height` grid of real-valued samples.
///
/// Represents one color channel or a grayscale image between pipeline
/// stages. Samples are addressed as `(x, y)` with `(0, 0)` at the top
/// left and rows stored contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl Plane {
    /// Create a plane with every sample set to `value`.
    #[must_use]
    pub fn filled(width: u32, height: u32, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Create a plane by evaluating `f(x, y)` at every position.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f64) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Create a plane from a row-major sample buffer.
    ///
    /// Returns `None` if `data.len()` does not equal `width * height`.
    #[must_use]
    pub fn from_raw(width: u32, height: u32, data: Vec<f64>) -> Option<Self> {
        if data.len() == width as usize * height as usize {
            Some(Self {
                width,
                height,
                data,
            })
        } else {
            None
        }
    }

    /// Width in samples.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in samples.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a pair.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        assert!(x < self.width && y < self.height, "sample out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// All samples in row-major order.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.data
    }
}

/// Quantize a real-valued sample into the `[0, 255]` pixel range.
///
/// Rounds half-up to the nearest integer, then clamps: values below
/// zero become 0, values above 255 become 255.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quantize(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn filled_has_uniform_samples() {
        let p = Plane::filled(4, 3, 7.5);
        assert_eq!(p.width(), 4);
        assert_eq!(p.height(), 3);
        assert_eq!(p.samples().len(), 12);
        assert!(p.samples().iter().all(|&s| s == 7.5));
    }

    #[test]
    fn from_fn_is_row_major() {
        let p = Plane::from_fn(3, 2, |x, y| f64::from(y * 10 + x));
        assert_eq!(p.samples(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(p.get(2, 0), 2.0);
        assert_eq!(p.get(0, 1), 10.0);
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(Plane::from_raw(2, 2, vec![1.0, 2.0, 3.0]).is_none());
        assert!(Plane::from_raw(2, 2, vec![1.0, 2.0, 3.0, 4.0]).is_some());
    }

    #[test]
    #[should_panic(expected = "sample out of bounds")]
    fn get_out_of_bounds_panics() {
        let p = Plane::filled(2, 2, 0.0);
        let _ = p.get(2, 0);
    }

    #[test]
    fn zero_sized_plane_is_representable() {
        let p = Plane::filled(0, 5, 1.0);
        assert_eq!(p.samples().len(), 0);
    }

    // ─────── quantize ────────────────────────────────────────────

    #[test]
    fn quantize_clamps_below_zero() {
        assert_eq!(quantize(-5.0), 0);
        assert_eq!(quantize(-0.4), 0);
    }

    #[test]
    fn quantize_clamps_above_255() {
        assert_eq!(quantize(300.0), 255);
        assert_eq!(quantize(255.4), 255);
    }

    #[test]
    fn quantize_rounds_half_up() {
        assert_eq!(quantize(127.5), 128);
        assert_eq!(quantize(127.4), 127);
        assert_eq!(quantize(0.5), 1);
    }

    #[test]
    fn quantize_is_idempotent() {
        for value in [-12.3, 0.0, 0.5, 127.5, 199.99, 255.0, 1000.0] {
            let once = quantize(value);
            assert_eq!(quantize(f64::from(once)), once, "value {value}");
        }
    }

    #[test]
    fn quantize_in_range_values_round_trip() {
        for v in 0..=255_u8 {
            assert_eq!(quantize(f64::from(v)), v);
        }
    }
}
