use std::sync::LazyLock;

use crate::catalog::parser::parse_catalog_str;
use crate::catalog::types::Catalog;
use crate::error::CatalogError;

const DEVICES_YAML: &str = include_str!("../../catalog/devices.yaml");
const PRECISIONS_YAML: &str = include_str!("../../catalog/precisions.yaml");

static BUILTIN: LazyLock<Result<Catalog, String>> = LazyLock::new(|| {
    parse_catalog_str(DEVICES_YAML, PRECISIONS_YAML).map_err(|e| e.to_string())
});

impl Catalog {
    /// The catalog shipped with the crate, parsed once per process.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Schema`] if the embedded data does not
    /// parse or validate.
    pub fn builtin() -> Result<&'static Catalog, CatalogError> {
        BUILTIN
            .as_ref()
            .map_err(|msg| CatalogError::Schema(format!("builtin catalog: {msg}")))
    }
}
