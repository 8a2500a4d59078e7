//! Convolution kernels and the named 3x3 filter catalog.
//!
//! A [`Kernel`] is a small square weight matrix applied during
//! convolution. The edge detector uses three fixed catalog entries,
//! selected through [`FilterKind`]. Adding a filter means adding a
//! catalog entry, not adding a branch to the pipeline.

use serde::{Deserialize, Serialize};

use crate::types::Dimensions;

/// Weights for the vertical-edge filter, row by row.
const VERTICAL: [[f64; 3]; 3] = [[1.0, 0.0, -1.0], [1.0, 0.0, -1.0], [1.0, 0.0, -1.0]];

/// Weights for the horizontal-edge filter, row by row.
const HORIZONTAL: [[f64; 3]; 3] = [[1.0, 1.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -1.0, -1.0]];

/// Weights for the Sobel filter, row by row.
const SOBEL: [[f64; 3]; 3] = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];

/// A square, odd-dimensioned grid of convolution weights.
///
/// Immutable after construction. Weights are stored row-major and
/// addressed as `(x, y)` offsets from the kernel's top-left corner,
/// matching [`Plane`](crate::plane::Plane) addressing.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: u32,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a square kernel from row-major weights.
    ///
    /// Returns `None` if `size` is zero or `weights.len()` does not
    /// equal `size * size`.
    #[must_use]
    pub fn new(size: u32, weights: Vec<f64>) -> Option<Self> {
        if size >= 1 && weights.len() == size as usize * size as usize {
            Some(Self { size, weights })
        } else {
            None
        }
    }

    /// Build a 3x3 kernel from row-major weight rows.
    #[must_use]
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self {
            size: 3,
            weights: rows.into_iter().flatten().collect(),
        }
    }

    /// Kernel width in samples.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size
    }

    /// Kernel height in samples.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size
    }

    /// Dimensions as a pair.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.size,
            height: self.size,
        }
    }

    /// Weight at offset `(x, y)` from the kernel's top-left corner.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is outside the kernel.
    #[must_use]
    pub fn weight(&self, x: u32, y: u32) -> f64 {
        assert!(x < self.size && y < self.size, "kernel weight out of bounds");
        self.weights[y as usize * self.size as usize + x as usize]
    }
}

/// Selects one of the named edge-detection filters.
///
/// This is the catalog key: each variant maps to a fixed 3x3 weight
/// matrix via [`kernel`](Self::kernel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    /// Sobel operator: vertical edges with a center-weighted response.
    Sobel,
    /// Plain horizontal-edge filter.
    Horizontal,
    /// Plain vertical-edge filter.
    Vertical,
}

impl FilterKind {
    /// Look up this filter's weight matrix in the catalog.
    #[must_use]
    pub fn kernel(self) -> Kernel {
        match self {
            Self::Sobel => Kernel::from_rows(SOBEL),
            Self::Horizontal => Kernel::from_rows(HORIZONTAL),
            Self::Vertical => Kernel::from_rows(VERTICAL),
        }
    }

    /// Stable lowercase name, used in reports and error context.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sobel => "sobel",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
