//! Lloyd's k-means engine.

use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::types::Point;

use super::algorithms::{
    assign_points, compute_centroids, compute_inertia, distinct_point_count,
    max_centroid_movement, reseed_empty, seeded_init,
};

/// Trait for clustering standardized points into k groups.
pub trait KMeansClustering {
    /// Partition `points` into `config.k` clusters.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InsufficientData` if `config.k` exceeds the
    /// number of distinct points.
    ///
    /// # Determinism
    ///
    /// Identical `(points, k, seed)` must yield identical output across
    /// repeated runs.
    fn cluster(&self, points: &[Point], config: &PipelineConfig) -> Result<KMeansOutcome>;
}

/// Result of one k-means run.
#[derive(Clone, Debug, PartialEq)]
pub struct KMeansOutcome {
    /// Cluster id per row, in dataset order. Values lie in `[0, k)`.
    pub assignments: Vec<usize>,

    /// Final centroids in standardized space. Length equals k.
    pub centroids: Vec<Point>,

    /// Iterations executed. Equals `max_iterations` if the cap was hit.
    pub iterations: usize,

    /// Whether the loop stopped because assignments stabilized or centroid
    /// movement fell below the tolerance, rather than hitting the cap.
    pub converged: bool,

    /// Within-cluster sum of squares of the final partition.
    pub inertia: f64,
}

impl KMeansOutcome {
    /// Member count per cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.centroids.len()];
        for &cluster in &self.assignments {
            sizes[cluster] += 1;
        }
        sizes
    }
}

/// Standard Lloyd's-iteration k-means with seeded random initialization.
///
/// Each iteration is a pure step from `(centroids, points)` to
/// `(assignments, centroids)`; the engine only iterates that step until a
/// stopping predicate holds.
#[derive(Clone, Debug, Default)]
pub struct LloydKMeans;

impl LloydKMeans {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl KMeansClustering for LloydKMeans {
    fn cluster(&self, points: &[Point], config: &PipelineConfig) -> Result<KMeansOutcome> {
        let available = distinct_point_count(points);
        if config.k > available {
            return Err(PipelineError::InsufficientData {
                k: config.k,
                available,
            });
        }

        let mut centroids = seeded_init(points, config.k, config.seed);
        let mut assignments = assign_points(points, &centroids);
        let mut iterations = 0;
        let mut converged = false;

        for iter in 0..config.max_iterations {
            iterations = iter + 1;

            let (mut new_centroids, counts) = compute_centroids(points, &assignments, config.k);
            reseed_empty(points, &mut new_centroids, &counts);

            let movement = max_centroid_movement(&centroids, &new_centroids);
            centroids = new_centroids;

            let new_assignments = assign_points(points, &centroids);
            let changed = new_assignments != assignments;
            assignments = new_assignments;

            if !changed || movement < config.tolerance {
                converged = true;
                debug!(
                    iterations,
                    movement, "k-means converged"
                );
                break;
            }
        }

        if !converged {
            debug!(iterations, "k-means hit iteration cap without converging");
        }

        let inertia = compute_inertia(points, &assignments, &centroids);

        Ok(KMeansOutcome {
            assignments,
            centroids,
            iterations,
            converged,
            inertia,
        })
    }
}
