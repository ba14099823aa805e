use std::path::Path;

use super::{OutputFormat, load_catalog};

pub fn run(catalog_dir: Option<&Path>, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(catalog_dir)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&catalog.precisions)?);
        return Ok(());
    }

    for p in &catalog.precisions {
        println!("  {:<6} {:<6} x{:<4} {}", p.id, p.label, p.multiplier, p.description);
    }

    Ok(())
}
