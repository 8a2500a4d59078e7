//! From-scratch 2D convolution: valid, zero-padded, and cascaded.
//!
//! The base operator is [`convolve_valid`], which evaluates the kernel
//! only where it fully overlaps the input and therefore shrinks the
//! output by `kernel - 1` in each dimension. [`convolve_padded`] embeds
//! that valid result into a zero-filled plane of the original size,
//! giving the common "same size, zero border" form. The iterate
//! variants cascade either operator, feeding each pass the previous
//! pass's output.
//!
//! Valid mode is the mathematically clean choice (no border artifacts,
//! smaller output); padded mode keeps the result usable as an image of
//! the original dimensions. Both are first-class because repeated
//! filtering is a first-class use case, not just single passes.

use crate::kernel::Kernel;
use crate::plane::Plane;
use crate::types::PipelineError;

/// Convolve the kernel at a single position.
///
/// Computes `sum over (i, j) of plane[x+i][y+j] * kernel[i][j]` with
/// the kernel's top-left corner anchored at `(x, y)`.
///
/// # Errors
///
/// Returns [`PipelineError::BoundsViolation`] when `x + kernel_width`
/// exceeds the plane width or `y + kernel_height` exceeds the plane
/// height. This is a caller contract violation and is never retried.
pub fn convolve_at(plane: &Plane, x: u32, y: u32, kernel: &Kernel) -> Result<f64, PipelineError> {
    if u64::from(x) + u64::from(kernel.width()) > u64::from(plane.width())
        || u64::from(y) + u64::from(kernel.height()) > u64::from(plane.height())
    {
        return Err(PipelineError::BoundsViolation {
            x,
            y,
            kernel: kernel.dimensions(),
            plane: plane.dimensions(),
        });
    }
    Ok(accumulate(plane, x, y, kernel))
}

/// Kernel-window weighted sum with the bounds check already done.
fn accumulate(plane: &Plane, x: u32, y: u32, kernel: &Kernel) -> f64 {
    let mut sum = 0.0;
    for j in 0..kernel.height() {
        for i in 0..kernel.width() {
            sum += plane.get(x + i, y + j) * kernel.weight(i, j);
        }
    }
    sum
}

/// Valid-mode convolution: the base operator.
///
/// Applies [`convolve_at`] at every origin where the kernel fully
/// overlaps the plane, producing a `(W - Kw + 1) x (H - Kh + 1)` plane.
///
/// # Errors
///
/// Returns [`PipelineError::BoundsViolation`] if the kernel is larger
/// than the plane in either dimension.
pub fn convolve_valid(plane: &Plane, kernel: &Kernel) -> Result<Plane, PipelineError> {
    if kernel.width() > plane.width() || kernel.height() > plane.height() {
        return Err(PipelineError::BoundsViolation {
            x: 0,
            y: 0,
            kernel: kernel.dimensions(),
            plane: plane.dimensions(),
        });
    }
    let out_width = plane.width() - kernel.width() + 1;
    let out_height = plane.height() - kernel.height() + 1;
    Ok(Plane::from_fn(out_width, out_height, |x, y| {
        accumulate(plane, x, y, kernel)
    }))
}

/// Same-size convolution with a zero border.
///
/// Runs [`convolve_valid`], then embeds the smaller result into a
/// zero-filled plane of the original dimensions at offset
/// `(Kw / 2, Kh / 2)`. The floor-division offset centers odd kernels
/// exactly; for even kernels the extra border row/column lands on the
/// right/bottom. That asymmetry is intentional and must be preserved.
///
/// # Errors
///
/// Returns [`PipelineError::BoundsViolation`] if the kernel is larger
/// than the plane in either dimension.
pub fn convolve_padded(plane: &Plane, kernel: &Kernel) -> Result<Plane, PipelineError> {
    let valid = convolve_valid(plane, kernel)?;
    let left = kernel.width() / 2;
    let top = kernel.height() / 2;
    Ok(Plane::from_fn(plane.width(), plane.height(), |x, y| {
        let inside = x >= left
            && x < left + valid.width()
            && y >= top
            && y < top + valid.height();
        if inside {
            valid.get(x - left, y - top)
        } else {
            0.0
        }
    }))
}

/// Cascaded valid-mode convolution.
///
/// Runs `iterations` valid passes, each on the previous pass's output,
/// so the plane shrinks by `(Kw - 1, Kh - 1)` per pass. Zero iterations
/// return the input unchanged.
///
/// # Errors
///
/// Returns [`PipelineError::DegenerateIteration`] if a pass would
/// shrink either dimension below one sample. The error is raised before
/// that pass runs; no partial output escapes.
pub fn iterate_valid(
    plane: &Plane,
    kernel: &Kernel,
    iterations: u32,
) -> Result<Plane, PipelineError> {
    let mut current = plane.clone();
    for pass in 1..=iterations {
        if kernel.width() > current.width() || kernel.height() > current.height() {
            return Err(PipelineError::DegenerateIteration {
                pass,
                plane: current.dimensions(),
                kernel: kernel.dimensions(),
            });
        }
        current = convolve_valid(&current, kernel)?;
    }
    Ok(current)
}

/// Cascaded same-size convolution.
///
/// Runs `iterations` padded passes; the zero border restores the
/// original dimensions after every pass, so the output size never
/// changes. Zero iterations return the input unchanged.
///
/// # Errors
///
/// Returns [`PipelineError::BoundsViolation`] if the kernel is larger
/// than the plane in either dimension.
pub fn iterate_padded(
    plane: &Plane,
    kernel: &Kernel,
    iterations: u32,
) -> Result<Plane, PipelineError> {
    let mut current = plane.clone();
    for _ in 0..iterations {
        current = convolve_padded(&current, kernel)?;
    }
    Ok(current)
}
