//! K-means helper routines.
//!
//! Seeded centroid initialization, the assignment and update halves of a
//! Lloyd iteration, empty-cluster reseeding, and inertia.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::types::{Point, FEATURE_DIM};

use super::metrics::euclidean_distance_squared;

/// Draw k distinct rows as initial centroids.
///
/// Reproducible: the same `(points, k, seed)` always selects the same rows.
///
/// # Panics
///
/// Panics if `k > points.len()`. The engine rejects such inputs with
/// `InsufficientData` before initialization; callers invoking this directly
/// must uphold the same bound.
pub fn seeded_init(points: &[Point], k: usize, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rand::seq::index::sample(&mut rng, points.len(), k)
        .iter()
        .map(|i| points[i])
        .collect()
}

/// Index of the nearest centroid to a point.
///
/// Ties resolve to the lowest-indexed centroid (strict `<` scan).
pub fn nearest_centroid(point: &Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, centroid) in centroids.iter().enumerate() {
        let dist = euclidean_distance_squared(point, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = j;
        }
    }
    best
}

/// Assignment step: nearest centroid per row.
pub fn assign_points(points: &[Point], centroids: &[Point]) -> Vec<usize> {
    points
        .iter()
        .map(|p| nearest_centroid(p, centroids))
        .collect()
}

/// Update step: each centroid becomes the mean of its assigned rows.
///
/// Returns the new centroids and the member count per cluster. A cluster
/// with zero members keeps a zero centroid; the caller must reseed it via
/// [`reseed_empty`] before the next assignment.
pub fn compute_centroids(
    points: &[Point],
    assignments: &[usize],
    k: usize,
) -> (Vec<Point>, Vec<usize>) {
    let mut sums = vec![[0.0f64; FEATURE_DIM]; k];
    let mut counts = vec![0usize; k];

    for (point, &cluster) in points.iter().zip(assignments) {
        counts[cluster] += 1;
        for (s, v) in sums[cluster].iter_mut().zip(point) {
            *s += v;
        }
    }

    for (sum, &count) in sums.iter_mut().zip(&counts) {
        if count > 0 {
            for elem in sum.iter_mut() {
                *elem /= count as f64;
            }
        }
    }

    (sums, counts)
}

/// Reinitialize each emptied centroid to the row farthest from its nearest
/// surviving centroid, so no cluster stays empty.
///
/// Reseeded centroids count as surviving for subsequent empty clusters, so
/// two empties never land on the same row.
pub fn reseed_empty(points: &[Point], centroids: &mut [Point], counts: &[usize]) {
    let mut surviving: Vec<usize> = (0..centroids.len()).filter(|&j| counts[j] > 0).collect();

    for j in 0..centroids.len() {
        if counts[j] > 0 {
            continue;
        }

        let mut farthest = 0;
        let mut farthest_dist = -1.0;
        for (i, point) in points.iter().enumerate() {
            let nearest = surviving
                .iter()
                .map(|&s| euclidean_distance_squared(point, &centroids[s]))
                .fold(f64::INFINITY, f64::min);
            if nearest > farthest_dist {
                farthest_dist = nearest;
                farthest = i;
            }
        }

        centroids[j] = points[farthest];
        surviving.push(j);
    }
}

/// Maximum Euclidean movement between two centroid sets.
pub fn max_centroid_movement(old: &[Point], new: &[Point]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| euclidean_distance_squared(a, b).sqrt())
        .fold(0.0, f64::max)
}

/// Within-cluster sum of squares for a finished partition.
pub fn compute_inertia(points: &[Point], assignments: &[usize], centroids: &[Point]) -> f64 {
    points
        .iter()
        .zip(assignments)
        .map(|(point, &cluster)| euclidean_distance_squared(point, &centroids[cluster]))
        .sum()
}

/// Number of bit-exact distinct rows.
pub fn distinct_point_count(points: &[Point]) -> usize {
    let mut seen: HashSet<[u64; FEATURE_DIM]> = HashSet::with_capacity(points.len());
    for point in points {
        let mut key = [0u64; FEATURE_DIM];
        for (k, v) in key.iter_mut().zip(point) {
            *k = v.to_bits();
        }
        seen.insert(key);
    }
    seen.len()
}
