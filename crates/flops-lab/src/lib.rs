//! # flops-lab
//!
//! How much arithmetic is a matrix multiply, and how long does it take?
//!
//! A small library behind an educational calculator: count the FLOPs of
//! `A × B`, turn the count into a peak-throughput time estimate for an
//! accelerator at a chosen numeric precision, and explain the collective
//! communication primitives and parallelism strategies used to spread
//! that work across many devices.
//!
//! ## Modules
//!
//! - [`flops`]: Matrix shapes and operation counting
//! - [`estimate`]: Precision-adjusted execution time estimates
//! - [`catalog`]: Device and precision tables (YAML), lookup and validation
//! - [`collective`]: Step-by-step simulation of collective primitives
//! - [`parallel`]: Per-rank work when a product is sharded
//! - [`error`]: Error types and catalog validation findings
//!
//! ```
//! use flops_lab::catalog::Catalog;
//! use flops_lab::estimate::estimate_time;
//! use flops_lab::flops::{MatrixShape, compute_flops};
//!
//! let result = compute_flops(MatrixShape::new(3, 4), MatrixShape::new(4, 5)).unwrap();
//! assert_eq!(result.total_flops, 105);
//!
//! let catalog = Catalog::builtin().unwrap();
//! let a100 = catalog.lookup_device("A100 SXM").unwrap();
//! let fp32 = catalog.lookup_precision("fp32").unwrap();
//! let estimate = estimate_time(result.total_flops, a100, fp32).unwrap();
//! assert_eq!(estimate.formatted, "0.005 ns");
//! ```

pub mod catalog;
pub mod collective;
pub mod error;
pub mod estimate;
pub mod flops;
pub mod parallel;
