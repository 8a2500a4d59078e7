//! rinkaku-io: the filesystem boundary around the detection core.
//!
//! Reads the configured source image, drives one detection run per
//! configured filter, and writes each resulting edge map as a numbered
//! grayscale PNG (`edges1.png`, `edges2.png`, ...). The counter is
//! process-wide per [`EdgeWriter`] and atomic, so concurrent filter
//! runs can never reuse a number.
//!
//! All container parsing and encoding is delegated to the `image`
//! crate; the detection core never touches the filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

use rinkaku_pipeline::edge::detect_edges_timed;
use rinkaku_pipeline::types::GrayImage;
use rinkaku_pipeline::{DetectorConfig, FilterDiagnostics, FilterKind, PipelineError, decode_rgb};

/// Errors raised at the filesystem boundary.
///
/// I/O variants carry the path (and filter, for writes) so a caller
/// can retry manually; nothing here retries automatically.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// The source image could not be read.
    #[error("failed to read source image {path}: {source}")]
    ReadSource {
        /// Path of the unreadable source.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },

    /// An edge map could not be written.
    #[error("failed to write {filter} edge map to {path}: {source}")]
    WriteOutput {
        /// Filter whose output failed to write.
        filter: FilterKind,
        /// Destination path of the failed write.
        path: PathBuf,
        /// Underlying encode/write error.
        source: image::ImageError,
    },

    /// The detection core rejected the input.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Writes edge maps as `edges<N>.png` with a monotonically increasing
/// counter starting at 1.
///
/// Each write consumes a counter value whether or not the write
/// succeeds, mirroring the output-numbering contract: values are
/// unique and never reused, with no ordering requirement between
/// concurrent writers.
#[derive(Debug)]
pub struct EdgeWriter {
    dir: PathBuf,
    counter: AtomicU32,
}

impl EdgeWriter {
    /// Create a writer that places outputs in `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            counter: AtomicU32::new(1),
        }
    }

    /// Write one edge map, consuming the next counter value.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteOutput`] if the destination is not
    /// writable. The counter value is consumed either way.
    pub fn write(&self, filter: FilterKind, edges: &GrayImage) -> Result<WrittenEdgeMap, IoError> {
        let index = self.counter.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!("edges{index}.png"));
        edges
            .save(&path)
            .map_err(|source| IoError::WriteOutput {
                filter,
                path: path.clone(),
                source,
            })?;
        Ok(WrittenEdgeMap {
            filter,
            index,
            path,
        })
    }
}

/// Record of one successfully written edge map.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenEdgeMap {
    /// Filter that produced the map.
    pub filter: FilterKind,
    /// Counter value used in the filename.
    pub index: u32,
    /// Full path of the written file.
    pub path: PathBuf,
}

/// Report of a full multi-filter run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Outputs written, in filter order.
    pub outputs: Vec<WrittenEdgeMap>,
    /// Per-filter stage timings.
    pub diagnostics: Vec<FilterDiagnostics>,
}

/// Run every configured filter against one source image.
///
/// The source is read and decoded once; an unreadable or undecodable
/// source aborts before any output is written. Each filter then runs
/// to completion and writes independently: a failed write is fatal for
/// that filter only, the remaining filters are still attempted, and
/// the first write error encountered is returned after all filters
/// have run. Outputs written before a failure are left in place.
///
/// # Errors
///
/// Returns [`IoError::ReadSource`] or [`IoError::Pipeline`] for source
/// problems, and the first [`IoError::WriteOutput`] if any write
/// failed.
pub fn run(
    source: &Path,
    writer: &EdgeWriter,
    config: &DetectorConfig,
) -> Result<RunReport, IoError> {
    let bytes = fs::read(source).map_err(|source_err| IoError::ReadSource {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    let image = decode_rgb(&bytes)?;

    let mut outputs = Vec::with_capacity(config.filters.len());
    let mut diagnostics = Vec::with_capacity(config.filters.len());
    let mut first_write_error = None;

    for &filter in &config.filters {
        let (edges, filter_diagnostics) = detect_edges_timed(&image, filter, config.iterations)?;
        diagnostics.push(filter_diagnostics);
        match writer.write(filter, &edges) {
            Ok(written) => outputs.push(written),
            Err(err) => {
                if first_write_error.is_none() {
                    first_write_error = Some(err);
                }
            }
        }
    }

    match first_write_error {
        Some(err) => Err(err),
        None => Ok(RunReport {
            outputs,
            diagnostics,
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Rgb;
    use rinkaku_pipeline::RgbImage;

    /// Write a PNG with a sharp vertical boundary to `path`.
    fn write_source_png(path: &Path) {
        let img = RgbImage::from_fn(16, 16, |x, _y| {
            if x < 8 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        img.save(path).unwrap();
    }

    #[test]
    fn writer_numbers_outputs_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let writer = EdgeWriter::new(dir.path());
        let edges = GrayImage::new(4, 4);

        let first = writer.write(FilterKind::Sobel, &edges).unwrap();
        let second = writer.write(FilterKind::Horizontal, &edges).unwrap();

        assert_eq!(first.index, 1);
        assert_eq!(second.index, 2);
        assert!(dir.path().join("edges1.png").exists());
        assert!(dir.path().join("edges2.png").exists());
    }

    #[test]
    fn writer_consumes_counter_on_failed_write() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let writer = EdgeWriter::new(&missing);
        let edges = GrayImage::new(4, 4);

        let result = writer.write(FilterKind::Sobel, &edges);
        assert!(matches!(result, Err(IoError::WriteOutput { .. })));

        // The failed write used index 1; a later successful write must
        // not reuse it.
        fs::create_dir(&missing).unwrap();
        let written = writer.write(FilterKind::Sobel, &edges).unwrap();
        assert_eq!(written.index, 2);
    }

    #[test]
    fn run_writes_one_output_per_filter() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        write_source_png(&source);

        let writer = EdgeWriter::new(dir.path());
        let report = run(&source, &writer, &DetectorConfig::default()).unwrap();

        assert_eq!(report.outputs.len(), 3);
        assert_eq!(report.diagnostics.len(), 3);
        let filters: Vec<FilterKind> = report.outputs.iter().map(|o| o.filter).collect();
        assert_eq!(filters, DetectorConfig::DEFAULT_FILTERS.to_vec());
        for (i, output) in report.outputs.iter().enumerate() {
            assert_eq!(output.index as usize, i + 1);
            assert!(output.path.exists(), "missing {}", output.path.display());
        }
    }

    #[test]
    fn run_unreadable_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");

        let writer = EdgeWriter::new(dir.path());
        let result = run(&missing, &writer, &DetectorConfig::default());

        assert!(matches!(result, Err(IoError::ReadSource { .. })));
        assert!(!dir.path().join("edges1.png").exists());
    }

    #[test]
    fn run_corrupt_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bad.png");
        fs::write(&source, [0xFF, 0x00, 0x01]).unwrap();

        let writer = EdgeWriter::new(dir.path());
        let result = run(&source, &writer, &DetectorConfig::default());

        assert!(matches!(
            result,
            Err(IoError::Pipeline(PipelineError::ImageDecode(_)))
        ));
        assert!(!dir.path().join("edges1.png").exists());
    }

    #[test]
    fn run_attempts_every_filter_despite_write_failures() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        write_source_png(&source);

        // All writes fail (output directory does not exist), but every
        // filter still consumes a counter value.
        let writer = EdgeWriter::new(dir.path().join("nope"));
        let result = run(&source, &writer, &DetectorConfig::default());
        assert!(matches!(result, Err(IoError::WriteOutput { .. })));
        assert_eq!(writer.counter.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn run_uniform_source_produces_black_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("flat.png");
        RgbImage::from_pixel(8, 8, Rgb([77, 77, 77]))
            .save(&source)
            .unwrap();

        let writer = EdgeWriter::new(dir.path());
        let report = run(&source, &writer, &DetectorConfig::default()).unwrap();

        for output in &report.outputs {
            let written = image::open(&output.path).unwrap().to_luma8();
            assert!(
                written.pixels().all(|p| p.0[0] == 0),
                "{} edge map of a flat field is not black",
                output.filter,
            );
        }
    }
}
