use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use flops_lab::flops::MatrixShape;

mod commands;

use commands::OutputFormat;

/// Upper bound on `collective --ranks`; traces keep every rank's buffer
/// after every step.
const MAX_COLLECTIVE_RANKS: i64 = 32;
/// Upper bound on `collective --elements`.
const MAX_COLLECTIVE_ELEMENTS: i64 = 256;
/// Upper bound on `shard --ranks`; the plan holds one entry per rank.
const MAX_SHARD_RANKS: i64 = 1024;

/// Top-level CLI argument parser for the `flops` command
#[derive(Parser)]
#[command(
    name = "flops",
    about = "flops-lab: matrix-multiply FLOPs, accelerator time estimates, collectives",
    version
)]
struct Cli {
    /// Directory containing devices.yaml and precisions.yaml
    #[arg(long, global = true, env = "FLOPS_LAB_CATALOG_DIR")]
    catalog_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. warn, debug, flops_lab=trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log format: pretty (default), compact, or json
    #[arg(long, global = true, default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `flops` CLI
#[derive(Subcommand)]
enum Commands {
    /// Count the multiplications and additions of A × B
    Flops {
        /// Shape of the left matrix, e.g. 3x4
        a: MatrixShape,
        /// Shape of the right matrix, e.g. 4x5
        b: MatrixShape,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Estimate the execution time of A × B on a device
    Estimate {
        /// Shape of the left matrix, e.g. 4096x4096
        a: MatrixShape,
        /// Shape of the right matrix
        b: MatrixShape,
        /// Device name (default: first device in the catalog)
        #[arg(short, long)]
        device: Option<String>,
        /// Precision id: fp32, fp16, bf16, int8, int4, fp64
        #[arg(short, long, default_value = "fp32")]
        precision: String,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List devices grouped by series, fastest first
    Devices {
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List precision modes and their throughput multipliers
    Precisions {
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Validate a catalog directory (default: the active catalog)
    Validate {
        /// Directory containing devices.yaml and precisions.yaml
        dir: Option<PathBuf>,
    },
    /// Step through a collective communication primitive
    Collective {
        /// broadcast, scatter, gather, all-gather, reduce, or all-reduce
        primitive: String,
        /// Number of ranks (1 to 32)
        #[arg(
            short,
            long,
            default_value_t = 4,
            value_parser = clap::value_parser!(u32).range(1..=MAX_COLLECTIVE_RANKS)
        )]
        ranks: u32,
        /// Elements per rank (1 to 256)
        #[arg(
            short,
            long,
            default_value_t = 4,
            value_parser = clap::value_parser!(u32).range(1..=MAX_COLLECTIVE_ELEMENTS)
        )]
        elements: u32,
        /// Root rank for rooted primitives
        #[arg(long, default_value_t = 0)]
        root: usize,
        /// Use the ring algorithm (all-reduce only)
        #[arg(long)]
        ring: bool,
    },
    /// Show per-rank work when A × B is split across ranks
    Shard {
        /// Shape of the left matrix
        a: MatrixShape,
        /// Shape of the right matrix
        b: MatrixShape,
        /// data, tensor-column, tensor-row, or pipeline
        #[arg(short, long, default_value = "data")]
        strategy: String,
        /// Number of ranks (1 to 1024)
        #[arg(
            short,
            long,
            default_value_t = 4,
            value_parser = clap::value_parser!(u32).range(1..=MAX_SHARD_RANKS)
        )]
        ranks: u32,
        /// Also estimate the busiest rank's time on this device
        #[arg(short, long)]
        device: Option<String>,
        /// Precision id used with --device
        #[arg(short, long, default_value = "fp32")]
        precision: String,
    },
}

/// Dispatch a parsed CLI subcommand to its handler
fn run_command(
    command: Commands,
    catalog_dir: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Flops { a, b, format } => {
            commands::flops::run(a, b, OutputFormat::from_str(&format)?)
        }
        Commands::Estimate {
            a,
            b,
            device,
            precision,
            format,
        } => commands::estimate::run(
            catalog_dir,
            a,
            b,
            device.as_deref(),
            &precision,
            OutputFormat::from_str(&format)?,
        ),
        Commands::Devices { format } => {
            commands::devices::run(catalog_dir, OutputFormat::from_str(&format)?)
        }
        Commands::Precisions { format } => {
            commands::precisions::run(catalog_dir, OutputFormat::from_str(&format)?)
        }
        Commands::Validate { dir } => commands::validate::run(dir.as_deref().or(catalog_dir)),
        Commands::Collective {
            primitive,
            ranks,
            elements,
            root,
            ring,
        } => commands::collective::run(
            &primitive,
            usize::try_from(ranks)?,
            usize::try_from(elements)?,
            root,
            ring,
        ),
        Commands::Shard {
            a,
            b,
            strategy,
            ranks,
            device,
            precision,
        } => commands::shard::run(
            catalog_dir,
            a,
            b,
            &strategy,
            ranks,
            device.as_deref(),
            &precision,
        ),
    }
}

/// Install the stderr tracing subscriber
fn setup_logging(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        "json" => subscriber.json().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.pretty().init(),
    }
}

/// Entry point: parse CLI arguments and run the selected subcommand
fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, &cli.log_format);

    if let Err(e) = run_command(cli.command, cli.catalog_dir.as_deref()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
