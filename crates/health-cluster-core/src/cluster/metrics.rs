//! Distance metrics for clustering.

use crate::types::Point;

/// Squared Euclidean distance between two points.
///
/// Used for nearest-centroid comparisons where the sqrt is unnecessary.
#[inline]
pub fn euclidean_distance_squared(a: &Point, b: &Point) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Euclidean distance between two points.
#[inline]
pub fn euclidean_distance(a: &Point, b: &Point) -> f64 {
    euclidean_distance_squared(a, b).sqrt()
}
