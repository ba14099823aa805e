//! Splitting one matrix multiplication across ranks.
//!
//! For `Y = A × B` with `A: m x n` and `B: n x p`:
//!
//! - **Data** parallelism splits the rows of `A`. Each rank computes a
//!   slab of `Y`; gradients are later averaged with an all-reduce.
//! - **Tensor column** parallelism splits the columns of `B`. Each rank
//!   computes a column block of `Y`; an all-gather assembles it.
//! - **Tensor row** parallelism splits the inner dimension. Each rank
//!   computes a full-size partial sum `A_i × B_i`; an all-reduce adds the
//!   partials, which costs `m * p` additions per extra participating rank.
//! - **Pipeline** parallelism splits a model by layers. A single product
//!   is one stage, so it lands on one rank and the others idle.
//!
//! Uneven splits give the first `dim % ranks` ranks one extra slice.

use std::str::FromStr;

use serde::Serialize;

use crate::collective::Collective;
use crate::error::ShardError;
use crate::flops::{FlopsResult, MatrixShape, compute_flops};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    Data,
    TensorColumn,
    TensorRow,
    Pipeline,
}

impl Strategy {
    pub const ALL: [Self; 4] = [
        Self::Data,
        Self::TensorColumn,
        Self::TensorRow,
        Self::Pipeline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::TensorColumn => "tensor-column",
            Self::TensorRow => "tensor-row",
            Self::Pipeline => "pipeline",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Data => "replicate the weights, split the batch (rows of A)",
            Self::TensorColumn => "split the weight matrix B by output columns",
            Self::TensorRow => "split the inner dimension; partial sums are all-reduced",
            Self::Pipeline => "assign whole layers to ranks; activations flow point-to-point",
        }
    }

    /// Collectives the strategy relies on. Pipeline only uses
    /// point-to-point sends between neighbouring stages.
    pub fn collectives(self) -> &'static [Collective] {
        match self {
            Self::Data | Self::TensorRow => &[Collective::AllReduce],
            Self::TensorColumn => &[Collective::AllGather],
            Self::Pipeline => &[],
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ShardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "data" | "dp" => Ok(Self::Data),
            "tensor-column" | "tensor_column" | "column" | "tp-column" => Ok(Self::TensorColumn),
            "tensor-row" | "tensor_row" | "row" | "tp-row" => Ok(Self::TensorRow),
            "pipeline" | "pp" => Ok(Self::Pipeline),
            _ => Err(ShardError::UnknownStrategy(s.to_string())),
        }
    }
}

/// The slice of the product one rank computes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankShard {
    pub rank: u32,
    /// `None` when the rank received an empty slice.
    pub flops: Option<FlopsResult>,
    pub a: Option<MatrixShape>,
    pub b: Option<MatrixShape>,
}

impl RankShard {
    pub fn total_flops(&self) -> u128 {
        self.flops.map_or(0, |f| f.total_flops)
    }
}

/// Per-rank work for one sharded product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShardPlan {
    pub strategy: Strategy,
    pub unsharded: FlopsResult,
    pub shards: Vec<RankShard>,
    /// Additions performed by the all-reduce of tensor-row partial sums.
    pub reduction_additions: u128,
}

impl ShardPlan {
    /// FLOPs on the busiest rank; bounds the parallel step time.
    pub fn max_rank_flops(&self) -> u128 {
        self.shards
            .iter()
            .map(RankShard::total_flops)
            .max()
            .unwrap_or(0)
    }

    /// Sum over all ranks plus the reduction; equals the unsharded count.
    pub fn total_flops(&self) -> u128 {
        self.shards
            .iter()
            .map(RankShard::total_flops)
            .sum::<u128>()
            + self.reduction_additions
    }

    /// Ranks that received a non-empty slice.
    pub fn active_ranks(&self) -> usize {
        self.shards.iter().filter(|s| s.flops.is_some()).count()
    }
}

/// Split `dim` into `ranks` contiguous pieces, larger pieces first.
fn split(dim: u32, ranks: u32) -> Vec<u32> {
    let base = dim / ranks;
    let extra = dim % ranks;
    (0..ranks).map(|r| base + u32::from(r < extra)).collect()
}

/// Plan `a × b` across `ranks` ranks with `strategy`.
///
/// # Errors
///
/// [`ShardError::NoRanks`] if `ranks == 0`, or [`ShardError::Shape`]
/// if the product itself is invalid.
pub fn shard_matmul(
    a: MatrixShape,
    b: MatrixShape,
    strategy: Strategy,
    ranks: u32,
) -> Result<ShardPlan, ShardError> {
    if ranks == 0 {
        return Err(ShardError::NoRanks);
    }
    let unsharded = compute_flops(a, b)?;

    let pieces: Vec<(MatrixShape, MatrixShape)> = match strategy {
        Strategy::Data => split(a.rows, ranks)
            .into_iter()
            .map(|rows| (MatrixShape::new(rows, a.cols), b))
            .collect(),
        Strategy::TensorColumn => split(b.cols, ranks)
            .into_iter()
            .map(|cols| (a, MatrixShape::new(b.rows, cols)))
            .collect(),
        Strategy::TensorRow => split(a.cols, ranks)
            .into_iter()
            .map(|inner| (MatrixShape::new(a.rows, inner), MatrixShape::new(inner, b.cols)))
            .collect(),
        Strategy::Pipeline => (0..ranks)
            .map(|r| {
                if r == 0 {
                    (a, b)
                } else {
                    (MatrixShape::new(0, a.cols), b)
                }
            })
            .collect(),
    };

    let mut shards = Vec::with_capacity(pieces.len());
    for (rank, (sa, sb)) in (0..ranks).zip(pieces) {
        let shard = if sa.elements() == 0 || sb.elements() == 0 {
            RankShard {
                rank,
                flops: None,
                a: None,
                b: None,
            }
        } else {
            RankShard {
                rank,
                flops: Some(compute_flops(sa, sb)?),
                a: Some(sa),
                b: Some(sb),
            }
        };
        shards.push(shard);
    }

    let mut plan = ShardPlan {
        strategy,
        unsharded,
        shards,
        reduction_additions: 0,
    };
    if strategy == Strategy::TensorRow {
        let partials = plan.active_ranks() as u128;
        plan.reduction_additions =
            u128::from(unsharded.output_shape.elements()) * partials.saturating_sub(1);
    }
    tracing::debug!(
        %strategy,
        ranks,
        max_rank_flops = %plan.max_rank_flops(),
        "planned sharded matmul"
    );
    Ok(plan)
}
