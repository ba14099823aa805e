use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// The device and precision tables consulted by the estimator.
///
/// Both tables are plain data, loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub devices: Vec<Device>,
    pub precisions: Vec<PrecisionMode>,
}

/// Root of `devices.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceFile {
    pub version: String,
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Root of `precisions.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecisionFile {
    pub version: String,
    #[serde(default)]
    pub precisions: Vec<PrecisionMode>,
}

/// An accelerator entry.
///
/// `peak_tflops` is the dense FP32 figure; every precision multiplier is
/// applied relative to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique within a catalog.
    pub name: String,
    /// Display grouping, e.g. "Data Center" or "GeForce RTX 40".
    pub series: String,
    pub architecture: String,
    pub peak_tflops: f64,
    #[serde(default)]
    pub memory: Option<String>,
    #[serde(default)]
    pub release_year: Option<u16>,
}

/// A numeric format and its throughput relative to FP32.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionMode {
    /// Unique within a catalog, e.g. `fp16`.
    pub id: String,
    pub label: String,
    pub multiplier: f64,
    #[serde(default)]
    pub description: String,
}

/// Identifier of the FP32 baseline precision.
pub const BASELINE_PRECISION: &str = "fp32";

/// Peak throughputs, in TFLOPS, accepted by the validator and the estimator.
pub const PEAK_TFLOPS_RANGE: RangeInclusive<f64> = 1e-6..=1e6;

/// Precision multipliers accepted by the validator and the estimator.
pub const MULTIPLIER_RANGE: RangeInclusive<f64> = (1.0 / 1024.0)..=1024.0;
