use thiserror::Error;

use crate::flops::MatrixShape;

/// Failure to load or query a device/precision catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Schema violation: {0}")]
    Schema(String),

    #[error("No {kind} named `{key}` in the catalog")]
    NotFound { kind: CatalogKind, key: String },

    #[error("Catalog failed validation with {} error(s)", count_errors(.0))]
    Invalid(Vec<Violation>),
}

/// Which table a [`CatalogError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Device,
    Precision,
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::Precision => write!(f, "precision"),
        }
    }
}

fn count_errors(violations: &[Violation]) -> usize {
    violations
        .iter()
        .filter(|v| v.severity == Severity::Error)
        .count()
}

/// Two matrix shapes that cannot be multiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot multiply {a} by {b}: {reason}")]
pub struct ShapeError {
    pub a: MatrixShape,
    pub b: MatrixShape,
    pub reason: ShapeErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeErrorKind {
    /// `a.cols != b.rows`
    InnerDimensionMismatch,
    /// A dimension below 1.
    ZeroDimension,
}

impl std::fmt::Display for ShapeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InnerDimensionMismatch => {
                write!(f, "columns of the left matrix must equal rows of the right")
            }
            Self::ZeroDimension => write!(f, "every dimension must be at least 1"),
        }
    }
}

/// Textual shape input rejected before it reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeParseError {
    #[error("Expected a shape like `3x4`, got `{0}`")]
    Malformed(String),

    #[error("Dimension `{0}` is not a positive integer")]
    NotPositiveInteger(String),
}

/// Failure to turn an operation count into a duration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("Device `{name}` peak throughput {peak_tflops} TFLOPS is outside the supported range")]
    InvalidDevice { name: String, peak_tflops: f64 },

    #[error("Precision `{id}` multiplier {multiplier} is outside the supported range")]
    InvalidPrecision { id: String, multiplier: f64 },
}

/// Invalid input to a collective-communication simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectiveError {
    #[error("A collective needs at least one rank")]
    EmptyWorld,

    #[error("Root rank {root} is out of range for {world_size} rank(s)")]
    RootOutOfRange { root: usize, world_size: usize },

    #[error("Rank {rank} holds {actual} element(s), expected {expected}")]
    RaggedBuffers {
        rank: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot scatter {len} element(s) evenly across {world_size} rank(s)")]
    UnevenScatter { len: usize, world_size: usize },

    #[error("Unknown collective `{0}`")]
    Unknown(String),
}

/// Invalid input to the sharding planner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShardError {
    #[error("Sharding needs at least one rank")]
    NoRanks,

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Unknown parallelism strategy `{0}`")]
    UnknownStrategy(String),
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub severity: Severity,
    pub rule: String,
    pub message: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };
        write!(f, "[{prefix}] {}: {}", self.rule, self.message)
    }
}
