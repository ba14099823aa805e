use flops_lab::collective::{
    Collective, Trace, elements_sent, ring_all_reduce, ring_elements_sent_per_rank, simulate,
};

pub fn run(
    primitive: &str,
    ranks: usize,
    elements: usize,
    root: usize,
    ring: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let collective: Collective = primitive.parse()?;
    let buffers = initial_buffers(ranks, elements);

    let trace = if ring {
        if collective != Collective::AllReduce {
            return Err(format!("--ring only applies to all-reduce, not {collective}").into());
        }
        ring_all_reduce(&buffers)?
    } else {
        simulate(collective, &buffers, root)?
    };

    println!("{}: {}", collective, collective.description());
    println!();
    print_trace(&trace);

    let sent = trace.total_elements_sent();
    println!("Elements sent: {sent}");
    if ring {
        println!(
            "Per rank: {} (naive root handles {})",
            ring_elements_sent_per_rank(ranks, elements),
            elements_sent(Collective::AllReduce, ranks, elements)
        );
    }

    Ok(())
}

/// Rank `r` holds `r * elements + 1 ..= (r + 1) * elements`.
#[allow(clippy::cast_precision_loss)]
fn initial_buffers(ranks: usize, elements: usize) -> Vec<Vec<f64>> {
    (0..ranks)
        .map(|r| {
            (0..elements)
                .map(|i| (r * elements + i + 1) as f64)
                .collect()
        })
        .collect()
}

fn print_trace(trace: &Trace) {
    for (i, step) in trace.steps.iter().enumerate() {
        println!("[{i}] {}", step.description);
        for (rank, buf) in step.buffers.iter().enumerate() {
            let values: Vec<String> = buf.iter().map(|v| format!("{v}")).collect();
            println!("    rank {rank}: [{}]", values.join(", "));
        }
    }
    println!();
}
