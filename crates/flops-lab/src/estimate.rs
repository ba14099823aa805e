//! Wall-clock estimates from operation counts.
//!
//! Assumes the device sustains its published peak for the whole product,
//! so every estimate is a lower bound on real execution time.

use serde::Serialize;

use crate::catalog::{Device, MULTIPLIER_RANGE, PEAK_TFLOPS_RANGE, PrecisionMode};
use crate::error::EstimateError;

const TERA: f64 = 1e12;

/// Unit chosen for [`ExecutionTimeEstimate::formatted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Seconds => "s",
            Self::Milliseconds => "ms",
            Self::Microseconds => "µs",
            Self::Nanoseconds => "ns",
        }
    }
}

/// One duration expressed in every unit, plus a human-scaled string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionTimeEstimate {
    pub seconds: f64,
    pub milliseconds: f64,
    pub microseconds: f64,
    pub nanoseconds: f64,
    pub unit: TimeUnit,
    pub formatted: String,
    /// `device.peak_tflops * precision.multiplier`
    pub adjusted_throughput_tflops: f64,
}

impl std::fmt::Display for ExecutionTimeEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted)
    }
}

/// Estimate how long `total_flops` takes on `device` at `precision`.
///
/// The formatted string uses the first unit in which the value is at
/// least 1 (s, ms, µs with six decimals), falling back to nanoseconds
/// with three decimals. Zero FLOPs formats as `0.000000 s`.
///
/// # Errors
///
/// Returns [`EstimateError::InvalidDevice`] if the device's peak lies
/// outside [`PEAK_TFLOPS_RANGE`], or [`EstimateError::InvalidPrecision`]
/// if the multiplier lies outside [`MULTIPLIER_RANGE`]. NaN and infinities
/// fall outside both.
pub fn estimate_time(
    total_flops: u128,
    device: &Device,
    precision: &PrecisionMode,
) -> Result<ExecutionTimeEstimate, EstimateError> {
    if !PEAK_TFLOPS_RANGE.contains(&device.peak_tflops) {
        return Err(EstimateError::InvalidDevice {
            name: device.name.clone(),
            peak_tflops: device.peak_tflops,
        });
    }
    if !MULTIPLIER_RANGE.contains(&precision.multiplier) {
        return Err(EstimateError::InvalidPrecision {
            id: precision.id.clone(),
            multiplier: precision.multiplier,
        });
    }

    // Both factors are bounded, so the rate is finite and at least ~1e3
    // FLOP/s, and any u128 count divides to a finite number of seconds.
    let adjusted = device.peak_tflops * precision.multiplier;
    // Exact up to 2^53; beyond that only digits far below the printed
    // precision are lost.
    #[allow(clippy::cast_precision_loss)]
    let flops = total_flops as f64;
    let seconds = flops / (adjusted * TERA);
    let milliseconds = seconds * 1e3;
    let microseconds = seconds * 1e6;
    let nanoseconds = seconds * 1e9;

    let (unit, formatted) = if total_flops == 0 {
        (TimeUnit::Seconds, format!("{:.6} s", 0.0))
    } else if seconds >= 1.0 {
        (TimeUnit::Seconds, format!("{seconds:.6} s"))
    } else if milliseconds >= 1.0 {
        (TimeUnit::Milliseconds, format!("{milliseconds:.6} ms"))
    } else if microseconds >= 1.0 {
        (TimeUnit::Microseconds, format!("{microseconds:.6} µs"))
    } else {
        (TimeUnit::Nanoseconds, format!("{nanoseconds:.3} ns"))
    };

    tracing::debug!(
        device = %device.name,
        precision = %precision.id,
        adjusted_tflops = adjusted,
        %formatted,
        "estimated execution time"
    );

    Ok(ExecutionTimeEstimate {
        seconds,
        milliseconds,
        microseconds,
        nanoseconds,
        unit,
        formatted,
        adjusted_throughput_tflops: adjusted,
    })
}
