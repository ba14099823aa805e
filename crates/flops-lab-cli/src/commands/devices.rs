use std::path::Path;

use super::{OutputFormat, load_catalog};

pub fn run(catalog_dir: Option<&Path>, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(catalog_dir)?;
    let groups = catalog.list_devices_grouped_by_series();

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    for group in &groups {
        println!("{}", group.series);
        println!("{}", "-".repeat(group.series.len()));
        for device in &group.devices {
            let memory = device.memory.as_deref().unwrap_or("-");
            let year = device
                .release_year
                .map_or_else(|| "-".to_string(), |y| y.to_string());
            println!(
                "  {:<18} {:>7.1} TFLOPS  {:<14} {:<16} {year}",
                device.name, device.peak_tflops, device.architecture, memory
            );
        }
        println!();
    }
    println!("{} device(s) in {} series", catalog.devices.len(), groups.len());

    Ok(())
}
