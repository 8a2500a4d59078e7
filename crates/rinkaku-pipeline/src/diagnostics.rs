//! Per-filter run diagnostics: stage timings and output metadata.
//!
//! Permanent instrumentation for parameter experimentation. Every
//! timed detection run collects one [`FilterDiagnostics`] value which
//! the CLI renders as a human-readable report or JSON.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::kernel::FilterKind;
use crate::types::Dimensions;

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from one filter's detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDiagnostics {
    /// Which catalog filter ran.
    pub filter: FilterKind,
    /// Dimensions of the produced edge map.
    pub dimensions: Dimensions,
    /// Channel split duration (seconds).
    #[serde(with = "duration_serde")]
    pub split: Duration,
    /// Per-channel convolution duration, all three channels (seconds).
    #[serde(with = "duration_serde")]
    pub convolve: Duration,
    /// Channel summing duration (seconds).
    #[serde(with = "duration_serde")]
    pub sum: Duration,
    /// Clamp-and-render duration (seconds).
    #[serde(with = "duration_serde")]
    pub clamp: Duration,
    /// Total wall-clock duration of the run (seconds).
    #[serde(with = "duration_serde")]
    pub total: Duration,
}
