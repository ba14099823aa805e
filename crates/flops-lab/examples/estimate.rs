//! Estimate one matrix product on every catalog device at every precision.
//!
//! Usage:
//!   cargo run --example estimate -- 4096x4096 4096x4096

use std::process;

use flops_lab::catalog::Catalog;
use flops_lab::estimate::estimate_time;
use flops_lab::flops::{MatrixShape, compute_flops};

fn parse_shape(arg: Option<String>, which: &str) -> MatrixShape {
    let Some(text) = arg else {
        eprintln!("Usage: estimate <A shape> <B shape>   (e.g. 4096x4096 4096x4096)");
        process::exit(1);
    };
    text.parse().unwrap_or_else(|e| {
        eprintln!("Bad shape for {which}: {e}");
        process::exit(1);
    })
}

fn main() {
    let mut args = std::env::args().skip(1);
    let a = parse_shape(args.next(), "A");
    let b = parse_shape(args.next(), "B");

    let result = compute_flops(a, b).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let catalog = Catalog::builtin().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    println!("A ({a}) × B ({b}): {} FLOPs", result.total_flops);
    println!();

    let mut header = format!("{:<20}", "DEVICE");
    for p in &catalog.precisions {
        header.push_str(&format!(" {:>16}", p.label));
    }
    println!("{header}");
    println!("{}", "-".repeat(header.len()));

    for group in catalog.list_devices_grouped_by_series() {
        for device in group.devices {
            let mut row = format!("{:<20}", device.name);
            for precision in &catalog.precisions {
                match estimate_time(result.total_flops, device, precision) {
                    Ok(estimate) => row.push_str(&format!(" {:>16}", estimate.formatted)),
                    Err(e) => row.push_str(&format!(" {:>16}", format!("({e})"))),
                }
            }
            println!("{row}");
        }
    }
}
