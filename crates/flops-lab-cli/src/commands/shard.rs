use std::path::Path;

use flops_lab::estimate::estimate_time;
use flops_lab::flops::MatrixShape;
use flops_lab::parallel::{Strategy, shard_matmul};

use super::{group_digits, load_catalog, select_device, select_precision};

pub fn run(
    catalog_dir: Option<&Path>,
    a: MatrixShape,
    b: MatrixShape,
    strategy: &str,
    ranks: u32,
    device: Option<&str>,
    precision: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let strategy: Strategy = strategy.parse()?;
    let plan = shard_matmul(a, b, strategy, ranks)?;

    println!("{strategy} parallelism: {}", strategy.description());
    let collectives: Vec<&str> = strategy.collectives().iter().map(|c| c.name()).collect();
    if collectives.is_empty() {
        println!("Collectives: none (point-to-point only)");
    } else {
        println!("Collectives: {}", collectives.join(", "));
    }
    println!(
        "Unsharded: A ({a}) × B ({b}) = {} FLOPs",
        group_digits(plan.unsharded.total_flops)
    );
    println!();

    for shard in &plan.shards {
        match (shard.a, shard.b) {
            (Some(sa), Some(sb)) => println!(
                "  rank {:<3} {:>12} × {:<12} {:>20} FLOPs",
                shard.rank,
                sa.to_string(),
                sb.to_string(),
                group_digits(shard.total_flops())
            ),
            _ => println!("  rank {:<3} idle", shard.rank),
        }
    }
    if plan.reduction_additions > 0 {
        println!(
            "  all-reduce of partial sums: {} additions",
            group_digits(plan.reduction_additions)
        );
    }
    println!();
    println!("Busiest rank: {} FLOPs", group_digits(plan.max_rank_flops()));

    if let Some(name) = device {
        let catalog = load_catalog(catalog_dir)?;
        let device = select_device(&catalog, Some(name))?;
        let precision = select_precision(&catalog, precision)?;
        let busiest = estimate_time(plan.max_rank_flops(), device, precision)?;
        let whole = estimate_time(plan.unsharded.total_flops, device, precision)?;
        println!(
            "On {} at {}: busiest rank {busiest}, unsharded {whole}",
            device.name, precision.label
        );
    }

    Ok(())
}
