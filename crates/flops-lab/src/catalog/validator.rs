use std::collections::HashSet;

use crate::catalog::types::{BASELINE_PRECISION, Catalog, MULTIPLIER_RANGE, PEAK_TFLOPS_RANGE};
use crate::error::{Severity, Violation};

/// Oldest release year accepted without a warning.
const EARLIEST_PLAUSIBLE_YEAR: u16 = 1990;

/// Validate a parsed catalog for completeness and consistency.
///
/// Returns a list of violations. If any violation has
/// [`Severity::Error`], the catalog must not be used for estimates.
pub fn validate_catalog(catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    validate_non_empty(catalog, &mut violations);
    validate_devices(catalog, &mut violations);
    validate_precisions(catalog, &mut violations);
    validate_baseline(catalog, &mut violations);

    violations
}

fn validate_non_empty(catalog: &Catalog, violations: &mut Vec<Violation>) {
    if catalog.devices.is_empty() {
        violations.push(Violation {
            severity: Severity::Error,
            rule: "CAT-006".to_string(),
            message: "devices must contain at least one device".to_string(),
            location: Some("devices".to_string()),
        });
    }
    if catalog.precisions.is_empty() {
        violations.push(Violation {
            severity: Severity::Error,
            rule: "CAT-006".to_string(),
            message: "precisions must contain at least one precision mode".to_string(),
            location: Some("precisions".to_string()),
        });
    }
}

fn validate_devices(catalog: &Catalog, violations: &mut Vec<Violation>) {
    let mut names = HashSet::new();
    for (i, device) in catalog.devices.iter().enumerate() {
        // distinct under ASCII case folding, like lookups
        if !names.insert(device.name.to_ascii_lowercase()) {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "CAT-001".to_string(),
                message: format!("Duplicate device name: {}", device.name),
                location: Some(format!("devices[{i}].name")),
            });
        }
        if !PEAK_TFLOPS_RANGE.contains(&device.peak_tflops) {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "CAT-002".to_string(),
                message: format!(
                    "devices.{}.peak_tflops must be within {:e}..={:e}, got {}",
                    device.name,
                    PEAK_TFLOPS_RANGE.start(),
                    PEAK_TFLOPS_RANGE.end(),
                    device.peak_tflops
                ),
                location: Some(format!("devices[{i}].peak_tflops")),
            });
        }
        if device.series.trim().is_empty() || device.architecture.trim().is_empty() {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "CAT-003".to_string(),
                message: format!(
                    "devices.{}: series and architecture must not be empty",
                    device.name
                ),
                location: Some(format!("devices[{i}]")),
            });
        }
        if let Some(year) = device.release_year
            && year < EARLIEST_PLAUSIBLE_YEAR
        {
            violations.push(Violation {
                severity: Severity::Warning,
                rule: "CAT-008".to_string(),
                message: format!(
                    "devices.{}.release_year {year} looks implausible",
                    device.name
                ),
                location: Some(format!("devices[{i}].release_year")),
            });
        }
    }
}

fn validate_precisions(catalog: &Catalog, violations: &mut Vec<Violation>) {
    let mut ids = HashSet::new();
    for (i, precision) in catalog.precisions.iter().enumerate() {
        if !ids.insert(precision.id.to_ascii_lowercase()) {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "CAT-004".to_string(),
                message: format!("Duplicate precision id: {}", precision.id),
                location: Some(format!("precisions[{i}].id")),
            });
        }
        if !MULTIPLIER_RANGE.contains(&precision.multiplier) {
            violations.push(Violation {
                severity: Severity::Error,
                rule: "CAT-005".to_string(),
                message: format!(
                    "precisions.{}.multiplier must be within {}..={}, got {}",
                    precision.id,
                    MULTIPLIER_RANGE.start(),
                    MULTIPLIER_RANGE.end(),
                    precision.multiplier
                ),
                location: Some(format!("precisions[{i}].multiplier")),
            });
        }
    }
}

fn validate_baseline(catalog: &Catalog, violations: &mut Vec<Violation>) {
    match catalog
        .precisions
        .iter()
        .find(|p| p.id == BASELINE_PRECISION)
    {
        None => violations.push(Violation {
            severity: Severity::Warning,
            rule: "CAT-007".to_string(),
            message: format!(
                "no `{BASELINE_PRECISION}` precision; device figures have no explicit baseline"
            ),
            location: Some("precisions".to_string()),
        }),
        Some(p) if (p.multiplier - 1.0).abs() > f64::EPSILON => violations.push(Violation {
            severity: Severity::Warning,
            rule: "CAT-007".to_string(),
            message: format!(
                "`{BASELINE_PRECISION}` multiplier is {}, expected 1.0",
                p.multiplier
            ),
            location: Some(format!("precisions.{BASELINE_PRECISION}.multiplier")),
        }),
        Some(_) => {}
    }
}
