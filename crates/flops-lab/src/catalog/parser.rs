use std::path::Path;

use crate::catalog::types::{Catalog, DeviceFile, PrecisionFile};
use crate::catalog::validator::validate_catalog;
use crate::error::{CatalogError, Severity};

/// File name of the device table inside a catalog directory.
pub const DEVICES_FILE: &str = "devices.yaml";
/// File name of the precision table inside a catalog directory.
pub const PRECISIONS_FILE: &str = "precisions.yaml";

/// Load and validate `devices.yaml` + `precisions.yaml` from `dir`.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if either file cannot be read,
/// [`CatalogError::Yaml`] if either is malformed, or
/// [`CatalogError::Invalid`] if validation reports any error.
pub fn load_catalog_dir(dir: &Path) -> Result<Catalog, CatalogError> {
    let (devices, precisions) = read_dir_files(dir)?;
    parse_catalog_str(&devices, &precisions)
}

/// Read a catalog directory without validating it.
///
/// Used by tooling that wants to report every violation itself.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] or [`CatalogError::Yaml`].
pub fn read_catalog_dir(dir: &Path) -> Result<Catalog, CatalogError> {
    let (devices, precisions) = read_dir_files(dir)?;
    parse_catalog_str_unvalidated(&devices, &precisions)
}

fn read_dir_files(dir: &Path) -> Result<(String, String), CatalogError> {
    tracing::debug!(dir = %dir.display(), "reading catalog directory");
    let devices = std::fs::read_to_string(dir.join(DEVICES_FILE))?;
    let precisions = std::fs::read_to_string(dir.join(PRECISIONS_FILE))?;
    Ok((devices, precisions))
}

/// Parse and validate a catalog from the two YAML documents.
///
/// # Errors
///
/// Returns [`CatalogError::Yaml`] on malformed YAML, or
/// [`CatalogError::Invalid`] carrying every violation when any of them
/// has [`Severity::Error`].
pub fn parse_catalog_str(devices_yaml: &str, precisions_yaml: &str) -> Result<Catalog, CatalogError> {
    let catalog = parse_catalog_str_unvalidated(devices_yaml, precisions_yaml)?;
    let violations = validate_catalog(&catalog);
    if violations.iter().any(|v| v.severity == Severity::Error) {
        return Err(CatalogError::Invalid(violations));
    }
    for v in &violations {
        tracing::warn!(rule = %v.rule, "{}", v.message);
    }
    tracing::debug!(
        devices = catalog.devices.len(),
        precisions = catalog.precisions.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Parse the two YAML documents without validating them.
///
/// # Errors
///
/// Returns [`CatalogError::Yaml`] on malformed YAML.
pub fn parse_catalog_str_unvalidated(
    devices_yaml: &str,
    precisions_yaml: &str,
) -> Result<Catalog, CatalogError> {
    let devices: DeviceFile = serde_yaml::from_str(devices_yaml)?;
    let precisions: PrecisionFile = serde_yaml::from_str(precisions_yaml)?;
    Ok(Catalog {
        devices: devices.devices,
        precisions: precisions.precisions,
    })
}
