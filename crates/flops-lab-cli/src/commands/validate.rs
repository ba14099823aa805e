use std::path::Path;

use flops_lab::catalog::{Catalog, read_catalog_dir, validate_catalog};
use flops_lab::error::Severity;

pub fn run(dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = match dir {
        Some(dir) => read_catalog_dir(dir)?,
        None => Catalog::builtin()?.clone(),
    };
    let violations = validate_catalog(&catalog);

    let errors: Vec<_> = violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .collect();
    let warnings: Vec<_> = violations
        .iter()
        .filter(|v| v.severity == Severity::Warning)
        .collect();

    for v in &violations {
        println!("{v}");
    }

    println!(
        "\n{} device(s), {} precision(s): {} error(s), {} warning(s)",
        catalog.devices.len(),
        catalog.precisions.len(),
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        println!("Catalog is valid.");
        Ok(())
    } else {
        Err(format!("Catalog has {} validation error(s)", errors.len()).into())
    }
}
