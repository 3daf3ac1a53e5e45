//! Configuration for the clustering pipeline.
//!
//! All parameters are validated at construction time. Invalid configurations
//! result in immediate errors rather than surprises mid-pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Smallest recognized cluster count.
pub const MIN_CLUSTERS: usize = 2;

/// Largest recognized cluster count.
pub const MAX_CLUSTERS: usize = 10;

/// Default RNG seed for centroid initialization.
pub const DEFAULT_SEED: u64 = 42;

/// Default iteration cap for the k-means loop.
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// Default convergence tolerance on centroid movement.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Validated parameters for one pipeline invocation.
///
/// The pipeline is stateless: a config plus a dataset fully determines the
/// output, and the same `(dataset, k, seed)` always reproduces it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of clusters (k). Must lie in `[MIN_CLUSTERS, MAX_CLUSTERS]`.
    pub k: usize,

    /// Seed for the centroid-initialization RNG.
    pub seed: u64,

    /// Maximum k-means iterations before stopping. Must be > 0.
    pub max_iterations: usize,

    /// Convergence tolerance on maximum centroid movement.
    /// Must be a finite number > 0.
    pub tolerance: f64,
}

impl PipelineConfig {
    /// Create a new configuration with validation.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidConfig` if any parameter is outside
    /// its recognized range.
    pub fn new(k: usize, seed: u64, max_iterations: usize, tolerance: f64) -> Result<Self> {
        if !(MIN_CLUSTERS..=MAX_CLUSTERS).contains(&k) {
            return Err(PipelineError::invalid_config(format!(
                "k ({k}) must be in [{MIN_CLUSTERS}, {MAX_CLUSTERS}]"
            )));
        }
        if max_iterations == 0 {
            return Err(PipelineError::invalid_config("max_iterations must be > 0"));
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(PipelineError::invalid_config(
                "tolerance must be a finite positive number",
            ));
        }

        Ok(Self {
            k,
            seed,
            max_iterations,
            tolerance,
        })
    }

    /// Create a configuration for the given cluster count with the default
    /// seed, iteration cap, and tolerance.
    ///
    /// # Errors
    ///
    /// Returns error if k is outside `[MIN_CLUSTERS, MAX_CLUSTERS]`.
    pub fn with_k(k: usize) -> Result<Self> {
        Self::new(k, DEFAULT_SEED, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE)
    }
}

impl Default for PipelineConfig {
    /// Default configuration: k=3, seed=42, max_iterations=300, tolerance=1e-4.
    fn default() -> Self {
        Self {
            k: 3,
            seed: DEFAULT_SEED,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}
