//! Shared helpers for engine and catalog tests.

#![allow(dead_code)]

use flops_lab::catalog::{Catalog, Device, PrecisionMode};

/// Relative closeness for positive floating-point quantities.
pub fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= rel * scale
}

pub fn builtin() -> &'static Catalog {
    Catalog::builtin().expect("builtin catalog must load")
}

pub fn device(peak_tflops: f64) -> Device {
    Device {
        name: format!("synthetic-{peak_tflops}"),
        series: "Synthetic".to_string(),
        architecture: "Synthetic".to_string(),
        peak_tflops,
        memory: None,
        release_year: None,
    }
}

pub fn precision(multiplier: f64) -> PrecisionMode {
    PrecisionMode {
        id: format!("x{multiplier}"),
        label: format!("x{multiplier}"),
        multiplier,
        description: String::new(),
    }
}
