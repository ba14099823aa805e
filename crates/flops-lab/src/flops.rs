//! Operation counting for dense matrix multiplication.
//!
//! For `A (m x n) × B (n x p)` every one of the `m * p` output elements
//! is a dot product of length `n`: `n` multiplies and `n - 1` adds.
//!
//! Dimensions are `u32` and counts are `u128`. The largest possible
//! total is `2 * u32::MAX^3 ≈ 1.6e29`, well inside `u128::MAX ≈ 3.4e38`,
//! so no representable input overflows.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ShapeError, ShapeErrorKind, ShapeParseError};

/// Dimensions of a 2-D matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatrixShape {
    pub rows: u32,
    pub cols: u32,
}

impl MatrixShape {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of elements, `rows * cols`.
    pub fn elements(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    fn has_zero_dimension(&self) -> bool {
        self.rows < 1 || self.cols < 1
    }
}

impl std::fmt::Display for MatrixShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for MatrixShape {
    type Err = ShapeParseError;

    /// Parse `RxC`, `R×C`, `RXC` or `R,C`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split(['x', 'X', '×', ',']);
        let (Some(rows), Some(cols), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ShapeParseError::Malformed(s.to_string()));
        };
        Ok(Self::new(parse_dimension(rows)?, parse_dimension(cols)?))
    }
}

fn parse_dimension(raw: &str) -> Result<u32, ShapeParseError> {
    let raw = raw.trim();
    match raw.parse::<u32>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(ShapeParseError::NotPositiveInteger(raw.to_string())),
    }
}

/// Operation counts of a successful `A × B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlopsResult {
    pub total_flops: u128,
    pub multiplications: u128,
    pub additions: u128,
    pub output_shape: MatrixShape,
}

impl FlopsResult {
    /// FLOPs spent on each output element (`2n - 1`).
    pub fn flops_per_output_element(&self) -> u128 {
        let outputs = u128::from(self.output_shape.elements());
        self.total_flops.checked_div(outputs).unwrap_or(0)
    }
}

/// Count the multiplies and adds of `a × b`.
///
/// # Errors
///
/// Returns [`ShapeError`] if any dimension is zero or if
/// `a.cols != b.rows`. Nothing else can fail.
pub fn compute_flops(a: MatrixShape, b: MatrixShape) -> Result<FlopsResult, ShapeError> {
    if a.has_zero_dimension() || b.has_zero_dimension() {
        return Err(ShapeError {
            a,
            b,
            reason: ShapeErrorKind::ZeroDimension,
        });
    }
    if a.cols != b.rows {
        return Err(ShapeError {
            a,
            b,
            reason: ShapeErrorKind::InnerDimensionMismatch,
        });
    }

    let m = u128::from(a.rows);
    let n = u128::from(a.cols);
    let p = u128::from(b.cols);

    let multiplications = m * p * n;
    // n >= 1 here, so n - 1 never wraps
    let additions = m * p * (n - 1);
    let result = FlopsResult {
        total_flops: multiplications + additions,
        multiplications,
        additions,
        output_shape: MatrixShape::new(a.rows, b.cols),
    };
    tracing::trace!(%a, %b, total = %result.total_flops, "computed matmul flops");
    Ok(result)
}
