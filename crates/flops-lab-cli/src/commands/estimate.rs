use std::path::Path;

use flops_lab::estimate::estimate_time;
use flops_lab::flops::{MatrixShape, compute_flops};
use serde::Serialize;

use super::{OutputFormat, group_digits, load_catalog, select_device, select_precision};

#[derive(Serialize)]
struct Report<'a> {
    device: &'a str,
    precision: &'a str,
    flops: flops_lab::flops::FlopsResult,
    estimate: flops_lab::estimate::ExecutionTimeEstimate,
}

pub fn run(
    catalog_dir: Option<&Path>,
    a: MatrixShape,
    b: MatrixShape,
    device: Option<&str>,
    precision: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(catalog_dir)?;
    let device = select_device(&catalog, device)?;
    let precision = select_precision(&catalog, precision)?;

    let flops = compute_flops(a, b)?;
    let estimate = estimate_time(flops.total_flops, device, precision)?;

    match format {
        OutputFormat::Json => {
            let report = Report {
                device: &device.name,
                precision: &precision.id,
                flops,
                estimate,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("A ({a}) × B ({b}): {} FLOPs", group_digits(flops.total_flops));
            println!(
                "Device: {} ({}, {} TFLOPS FP32)",
                device.name, device.architecture, device.peak_tflops
            );
            println!(
                "Precision: {} (x{}) -> {} TFLOPS",
                precision.label, precision.multiplier, estimate.adjusted_throughput_tflops
            );
            println!("Estimated time: {estimate}");
            println!(
                "  = {:e} s = {:e} ms = {:e} µs = {:e} ns",
                estimate.seconds, estimate.milliseconds, estimate.microseconds, estimate.nanoseconds
            );
            println!("(peak throughput; real kernels run slower)");
        }
    }

    Ok(())
}
