//! Shared types for the rinkaku convolution pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kernel::FilterKind;

/// Re-export `GrayImage` so downstream crates can reference edge maps
/// without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` so downstream crates can reference the decoded
/// source image without depending on `image` directly.
pub use image::RgbImage;

/// Dimensions of a plane or image in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in samples.
    pub width: u32,
    /// Height in samples.
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Configuration for the edge-detection pipeline.
///
/// Passed explicitly into every run; there is no process-wide
/// configuration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Number of cascaded same-size convolution passes applied to each
    /// channel. One pass is the classic single-filter edge response;
    /// higher values grow the effective receptive field.
    pub iterations: u32,

    /// Filters to run, in order. Each produces one output edge map.
    pub filters: Vec<FilterKind>,
}

impl DetectorConfig {
    /// Default number of convolution passes per channel.
    pub const DEFAULT_ITERATIONS: u32 = 1;

    /// Reference filter ordering: Sobel, then horizontal, then vertical.
    pub const DEFAULT_FILTERS: [FilterKind; 3] = [
        FilterKind::Sobel,
        FilterKind::Horizontal,
        FilterKind::Vertical,
    ];
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            filters: Self::DEFAULT_FILTERS.to_vec(),
        }
    }
}

/// Errors that can occur in the convolution core.
///
/// All variants except [`ImageDecode`](Self::ImageDecode) and
/// [`EmptyInput`](Self::EmptyInput) indicate a caller contract
/// violation; none of them is ever retried, and no partial output is
/// produced once one is raised.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A convolution origin plus the kernel extent exceeds the plane.
    #[error(
        "convolution at ({x}, {y}) with a {kernel} kernel exceeds the {plane} plane"
    )]
    BoundsViolation {
        /// Horizontal origin of the offending convolution.
        x: u32,
        /// Vertical origin of the offending convolution.
        y: u32,
        /// Dimensions of the kernel being applied.
        kernel: Dimensions,
        /// Dimensions of the plane being convolved.
        plane: Dimensions,
    },

    /// Channel planes to be combined have unequal dimensions.
    #[error("channel planes have mismatched dimensions: {expected} vs {actual}")]
    DimensionMismatch {
        /// Dimensions of the first plane.
        expected: Dimensions,
        /// Dimensions of the plane that disagreed.
        actual: Dimensions,
    },

    /// An iterated valid convolution would shrink a dimension below one.
    #[error(
        "valid convolution pass {pass} would shrink the {plane} plane below 1x1 \
         with a {kernel} kernel"
    )]
    DegenerateIteration {
        /// One-based index of the pass that cannot run.
        pass: u32,
        /// Plane dimensions entering the offending pass.
        plane: Dimensions,
        /// Dimensions of the kernel being applied.
        kernel: Dimensions,
    },

    /// Failed to decode the source image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The source image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,
}
