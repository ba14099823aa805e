use serde::Serialize;

use crate::catalog::types::{BASELINE_PRECISION, Catalog, Device, PrecisionMode};
use crate::error::{CatalogError, CatalogKind};

/// Devices sharing a series label, fastest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesGroup<'a> {
    pub series: &'a str,
    pub devices: Vec<&'a Device>,
}

impl Catalog {
    /// Find a device by name.
    ///
    /// An exact match wins; otherwise the first ASCII case-insensitive
    /// match is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when nothing matches.
    pub fn lookup_device(&self, name: &str) -> Result<&Device, CatalogError> {
        self.devices
            .iter()
            .find(|d| d.name == name)
            .or_else(|| {
                self.devices
                    .iter()
                    .find(|d| d.name.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| CatalogError::NotFound {
                kind: CatalogKind::Device,
                key: name.to_string(),
            })
    }

    /// Find a precision mode by id: exact match first, then ignoring
    /// ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when nothing matches.
    pub fn lookup_precision(&self, id: &str) -> Result<&PrecisionMode, CatalogError> {
        self.precisions
            .iter()
            .find(|p| p.id == id)
            .or_else(|| {
                self.precisions
                    .iter()
                    .find(|p| p.id.eq_ignore_ascii_case(id))
            })
            .ok_or_else(|| CatalogError::NotFound {
                kind: CatalogKind::Precision,
                key: id.to_string(),
            })
    }

    /// First device in file order; the fallback selection.
    pub fn default_device(&self) -> Option<&Device> {
        self.devices.first()
    }

    /// The FP32 baseline, or the first precision if there is none.
    pub fn default_precision(&self) -> Option<&PrecisionMode> {
        self.precisions
            .iter()
            .find(|p| p.id == BASELINE_PRECISION)
            .or_else(|| self.precisions.first())
    }

    /// Group devices by series label.
    ///
    /// Groups appear in the order their series first appears in the
    /// table. Within a group devices are sorted by descending peak
    /// throughput; equal throughputs keep table order.
    pub fn list_devices_grouped_by_series(&self) -> Vec<SeriesGroup<'_>> {
        let mut groups: Vec<SeriesGroup<'_>> = Vec::new();
        for device in &self.devices {
            match groups.iter_mut().find(|g| g.series == device.series) {
                Some(group) => group.devices.push(device),
                None => groups.push(SeriesGroup {
                    series: &device.series,
                    devices: vec![device],
                }),
            }
        }
        for group in &mut groups {
            group
                .devices
                .sort_by(|a, b| b.peak_tflops.total_cmp(&a.peak_tflops));
        }
        groups
    }
}
