use std::borrow::Cow;
use std::path::Path;
use std::str::FromStr;

use flops_lab::catalog::{Catalog, Device, PrecisionMode, load_catalog_dir};

pub mod collective;
pub mod devices;
pub mod estimate;
pub mod flops;
pub mod precisions;
pub mod shard;
pub mod validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format '{other}', expected 'text' or 'json'"
            )),
        }
    }
}

/// The catalog in `dir`, or the builtin one.
pub fn load_catalog(dir: Option<&Path>) -> Result<Cow<'static, Catalog>, Box<dyn std::error::Error>> {
    match dir {
        Some(dir) => Ok(Cow::Owned(load_catalog_dir(dir)?)),
        None => Ok(Cow::Borrowed(Catalog::builtin()?)),
    }
}

/// Resolve a device selection, falling back to the catalog default
/// when none was given.
pub fn select_device<'c>(
    catalog: &'c Catalog,
    name: Option<&str>,
) -> Result<&'c Device, Box<dyn std::error::Error>> {
    let Some(name) = name else {
        let device = catalog
            .default_device()
            .ok_or("catalog has no devices")?;
        tracing::info!(device = %device.name, "no device given, using catalog default");
        return Ok(device);
    };
    catalog.lookup_device(name).map_err(|e| {
        let names: Vec<&str> = catalog.devices.iter().map(|d| d.name.as_str()).collect();
        format!("{e}; available: {}", names.join(", ")).into()
    })
}

/// Resolve a precision id, listing the valid ids on failure.
pub fn select_precision<'c>(
    catalog: &'c Catalog,
    id: &str,
) -> Result<&'c PrecisionMode, Box<dyn std::error::Error>> {
    catalog.lookup_precision(id).map_err(|e| {
        let ids: Vec<&str> = catalog.precisions.iter().map(|p| p.id.as_str()).collect();
        format!("{e}; available: {}", ids.join(", ")).into()
    })
}

/// `1234567` -> `1,234,567`
pub fn group_digits(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
