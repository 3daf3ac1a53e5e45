//! K-means clustering of standardized feature points.
//!
//! # Algorithm
//!
//! 1. Initialize k centroids by drawing k distinct rows with a seeded RNG
//! 2. Assign each row to the nearest centroid (squared Euclidean distance)
//! 3. Recompute centroids as the mean of assigned rows; reseed any centroid
//!    left empty to the row farthest from its nearest surviving centroid
//! 4. Repeat until assignments stabilize, centroid movement falls below the
//!    tolerance, or the iteration cap is reached
//!
//! # Determinism
//!
//! Identical `(points, k, seed)` always produces identical assignments and
//! centroids. This is a contract, not an accident: the initialization draws
//! from an explicitly seeded generator, never ambient randomness.
//!
//! # Cluster ids
//!
//! Cluster ids are an artifact of centroid convergence order. Id 0 carries no
//! meaning across runs, seeds, or values of k.

pub mod algorithms;
pub mod engine;
pub mod metrics;

#[cfg(test)]
mod tests;

pub use engine::{KMeansClustering, KMeansOutcome, LloydKMeans};
