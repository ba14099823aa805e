//! Compare the naive and ring all-reduce on a small cluster.
//!
//! Usage:
//!   cargo run --example collectives -- 8 1024

use std::process;

use flops_lab::collective::{
    Collective, elements_sent, ring_all_reduce, ring_elements_sent_per_rank, simulate,
};

fn arg_or(index: usize, default: usize) -> usize {
    std::env::args().nth(index).map_or(default, |s| {
        s.parse().unwrap_or_else(|_| {
            eprintln!("Usage: collectives [ranks] [elements]");
            process::exit(1);
        })
    })
}

#[allow(clippy::cast_precision_loss)]
fn main() {
    let ranks = arg_or(1, 8);
    let len = arg_or(2, 1024);

    let buffers: Vec<Vec<f64>> = (0..ranks)
        .map(|r| (0..len).map(|i| (r + i) as f64).collect())
        .collect();

    let naive = simulate(Collective::AllReduce, &buffers, 0).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let ring = ring_all_reduce(&buffers).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let agree = naive.final_buffers() == ring.final_buffers();
    println!("{ranks} ranks x {len} elements");
    println!(
        "naive: {:>4} steps, {:>10} elements, root sends {}",
        naive.steps.len() - 1,
        naive.total_elements_sent(),
        elements_sent(Collective::Broadcast, ranks, len)
    );
    println!(
        "ring:  {:>4} steps, {:>10} elements, each rank sends {}",
        ring.steps.len() - 1,
        ring.total_elements_sent(),
        ring_elements_sent_per_rank(ranks, len)
    );
    println!("results agree: {agree}");

    if !agree {
        process::exit(1);
    }
}
