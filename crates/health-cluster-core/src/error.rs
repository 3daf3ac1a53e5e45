//! Error types for the clustering pipeline.
//!
//! All failures are raised synchronously to the caller. Nothing is retried
//! internally and no partial results are returned: a pipeline invocation
//! either produces a complete [`crate::pipeline::PipelineResult`] or an error.

use thiserror::Error;

/// Unified error type for the clustering pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No records survived numeric coercion.
    #[error("dataset is empty after numeric coercion")]
    EmptyDataset,

    /// A feature column has zero variance, so standardization would divide
    /// by zero.
    #[error("feature '{feature}' has zero variance, cannot standardize")]
    DegenerateFeature {
        /// Name of the degenerate feature column.
        feature: &'static str,
    },

    /// Requested cluster count exceeds the number of distinct points.
    #[error("cannot form {k} clusters from {available} distinct points")]
    InsufficientData {
        /// Requested cluster count.
        k: usize,
        /// Number of distinct points available.
        available: usize,
    },

    /// A quality metric is undefined for the realized partition.
    #[error("clustering quality undefined: {0}")]
    DegenerateClustering(String),

    /// A configuration parameter is outside its recognized range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Create a `DegenerateClustering` error from any message.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateClustering(msg.into())
    }

    /// Create an `InvalidConfig` error from any message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;
