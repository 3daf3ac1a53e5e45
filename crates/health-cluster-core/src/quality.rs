//! Partition quality metrics.
//!
//! Two independent scalar scores computed from the standardized matrix and a
//! cluster assignment: the silhouette score (higher is better, range
//! `[-1, 1]`) and the Davies-Bouldin index (lower is better, range
//! `[0, inf)`). Both are undefined for k < 2 or when a denominator would be
//! zero, and fail with `DegenerateClustering` in those cases.

use crate::cluster::metrics::euclidean_distance;
use crate::error::{PipelineError, Result};
use crate::types::{Point, FEATURE_DIM};

/// Mean silhouette coefficient over all points.
///
/// For point i: a(i) is the mean distance to other members of its own
/// cluster, b(i) the minimum over other clusters of the mean distance to that
/// cluster's members, and s(i) = (b - a) / max(a, b). Points in singleton
/// clusters score 0.
///
/// # Errors
///
/// `DegenerateClustering` if k < 2, if any cluster has no members, or if
/// some point has `max(a, b) == 0` (coincident points across clusters).
pub fn silhouette_score(points: &[Point], assignments: &[usize], k: usize) -> Result<f64> {
    if k < 2 {
        return Err(PipelineError::degenerate(
            "silhouette score requires at least 2 clusters",
        ));
    }

    let sizes = cluster_sizes(assignments, k)?;
    let n = points.len();

    let mut total = 0.0;
    for i in 0..n {
        let own = assignments[i];
        if sizes[own] == 1 {
            // a(i) undefined for a singleton; the point contributes 0
            continue;
        }

        // Sum of distances from point i to every cluster
        let mut dist_sums = vec![0.0f64; k];
        for j in 0..n {
            if j == i {
                continue;
            }
            dist_sums[assignments[j]] += euclidean_distance(&points[i], &points[j]);
        }

        let a = dist_sums[own] / (sizes[own] - 1) as f64;
        let b = (0..k)
            .filter(|&c| c != own)
            .map(|c| dist_sums[c] / sizes[c] as f64)
            .fold(f64::INFINITY, f64::min);

        let denom = a.max(b);
        if denom == 0.0 {
            return Err(PipelineError::degenerate(
                "silhouette denominator is zero (coincident points across clusters)",
            ));
        }
        total += (b - a) / denom;
    }

    Ok(total / n as f64)
}

/// Davies-Bouldin index of a partition.
///
/// For each cluster the scatter is the mean distance of members to their
/// centroid; the index is the mean over clusters of the worst
/// `(scatter_i + scatter_j) / distance(centroid_i, centroid_j)` ratio.
///
/// # Errors
///
/// `DegenerateClustering` if k < 2, if any cluster has no members, or if two
/// centroids coincide.
pub fn davies_bouldin_index(points: &[Point], assignments: &[usize], k: usize) -> Result<f64> {
    if k < 2 {
        return Err(PipelineError::degenerate(
            "Davies-Bouldin index requires at least 2 clusters",
        ));
    }

    let sizes = cluster_sizes(assignments, k)?;

    // Centroids of the realized partition
    let mut centroids = vec![[0.0f64; FEATURE_DIM]; k];
    for (point, &cluster) in points.iter().zip(assignments) {
        for (c, v) in centroids[cluster].iter_mut().zip(point) {
            *c += v;
        }
    }
    for (centroid, &size) in centroids.iter_mut().zip(&sizes) {
        for c in centroid.iter_mut() {
            *c /= size as f64;
        }
    }

    // Mean member-to-centroid distance per cluster
    let mut scatter = vec![0.0f64; k];
    for (point, &cluster) in points.iter().zip(assignments) {
        scatter[cluster] += euclidean_distance(point, &centroids[cluster]);
    }
    for (s, &size) in scatter.iter_mut().zip(&sizes) {
        *s /= size as f64;
    }

    let mut total = 0.0;
    for i in 0..k {
        let mut worst = 0.0f64;
        for j in 0..k {
            if j == i {
                continue;
            }
            let separation = euclidean_distance(&centroids[i], &centroids[j]);
            if separation == 0.0 {
                return Err(PipelineError::degenerate(format!(
                    "centroids {i} and {j} coincide"
                )));
            }
            worst = worst.max((scatter[i] + scatter[j]) / separation);
        }
        total += worst;
    }

    Ok(total / k as f64)
}

/// Member count per cluster id, failing if any cluster is unpopulated.
fn cluster_sizes(assignments: &[usize], k: usize) -> Result<Vec<usize>> {
    let mut sizes = vec![0usize; k];
    for &cluster in assignments {
        sizes[cluster] += 1;
    }
    if let Some(empty) = sizes.iter().position(|&s| s == 0) {
        return Err(PipelineError::degenerate(format!(
            "cluster {empty} has no members"
        )));
    }
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two tight, far-apart groups of three.
    fn separated() -> (Vec<Point>, Vec<usize>) {
        let points = vec![
            [-2.0, -2.0, -2.0],
            [-2.1, -2.0, -1.9],
            [-1.9, -2.1, -2.0],
            [2.0, 2.0, 2.0],
            [2.1, 2.0, 1.9],
            [1.9, 2.1, 2.0],
        ];
        let assignments = vec![0, 0, 0, 1, 1, 1];
        (points, assignments)
    }

    #[test]
    fn test_silhouette_high_for_separated_groups() {
        let (points, assignments) = separated();

        let score = silhouette_score(&points, &assignments, 2).unwrap();

        println!("[RESULT] silhouette = {:.4}", score);
        assert!(score > 0.5);
        assert!(score <= 1.0);

        println!("[VERIFIED] Well-separated groups score above 0.5");
    }

    #[test]
    fn test_silhouette_negative_for_swapped_labels() {
        let (points, mut assignments) = separated();
        // Deliberately mislabel one point from each group
        assignments.swap(0, 3);

        let score = silhouette_score(&points, &assignments, 2).unwrap();

        println!("[RESULT] silhouette with mislabels = {:.4}", score);
        assert!(score < 0.5);
        assert!(score >= -1.0);

        println!("[VERIFIED] Mislabeled points drag the silhouette down");
    }

    #[test]
    fn test_silhouette_bounds() {
        let (points, assignments) = separated();

        let score = silhouette_score(&points, &assignments, 2).unwrap();

        assert!((-1.0..=1.0).contains(&score));

        println!("[VERIFIED] Silhouette lies in [-1, 1]");
    }

    #[test]
    fn test_silhouette_singleton_cluster_counts_zero() {
        // Cluster 1 is a singleton; its point contributes 0
        let points = vec![[0.0, 0.0, 0.0], [0.1, 0.0, 0.0], [5.0, 5.0, 5.0]];
        let assignments = vec![0, 0, 1];

        let score = silhouette_score(&points, &assignments, 2).unwrap();

        // Remaining two points are near their own cluster, far from the other
        assert!(score > 0.0);
        assert!(score < 1.0);

        println!("[VERIFIED] Singleton cluster contributes 0 without failing");
    }

    #[test]
    fn test_silhouette_k1_fails() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let assignments = vec![0, 0];

        let result = silhouette_score(&points, &assignments, 1);

        assert!(matches!(result, Err(PipelineError::DegenerateClustering(_))));

        println!("[VERIFIED] FAIL FAST: silhouette undefined for k = 1");
    }

    #[test]
    fn test_silhouette_zero_denominator_fails() {
        // Four coincident points split across two clusters: a and b are both
        // zero for every point
        let points = vec![[0.0, 0.0, 0.0]; 4];
        let assignments = vec![0, 0, 1, 1];

        let result = silhouette_score(&points, &assignments, 2);

        assert!(matches!(result, Err(PipelineError::DegenerateClustering(_))));

        println!("[VERIFIED] FAIL FAST: coincident points across clusters rejected");
    }

    #[test]
    fn test_davies_bouldin_k1_fails() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let assignments = vec![0, 0];

        let result = davies_bouldin_index(&points, &assignments, 1);

        assert!(matches!(result, Err(PipelineError::DegenerateClustering(_))));

        println!("[VERIFIED] FAIL FAST: Davies-Bouldin undefined for k = 1");
    }

    #[test]
    fn test_davies_bouldin_low_for_separated_groups() {
        let (points, assignments) = separated();

        let index = davies_bouldin_index(&points, &assignments, 2).unwrap();

        println!("[RESULT] Davies-Bouldin = {:.4}", index);
        assert!(index >= 0.0);
        assert!(index < 0.5);

        println!("[VERIFIED] Well-separated groups give a low Davies-Bouldin index");
    }

    #[test]
    fn test_davies_bouldin_ranks_partitions() {
        let (points, good) = separated();
        let mut bad = good.clone();
        bad.swap(0, 3);

        let good_index = davies_bouldin_index(&points, &good, 2).unwrap();
        let bad_index = davies_bouldin_index(&points, &bad, 2).unwrap();

        println!(
            "[RESULT] DB good = {:.4}, DB mislabeled = {:.4}",
            good_index, bad_index
        );
        assert!(good_index < bad_index);

        println!("[VERIFIED] Davies-Bouldin penalizes the worse partition");
    }

    #[test]
    fn test_davies_bouldin_coincident_centroids_fail() {
        // Both clusters centered at the origin
        let points = vec![
            [-1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 1.0, 0.0],
        ];
        let assignments = vec![0, 0, 1, 1];

        let result = davies_bouldin_index(&points, &assignments, 2);

        assert!(matches!(result, Err(PipelineError::DegenerateClustering(_))));

        println!("[VERIFIED] FAIL FAST: coincident centroids rejected");
    }

    #[test]
    fn test_empty_cluster_fails_both_metrics() {
        let points = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];
        let assignments = vec![0, 0]; // cluster 1 unpopulated

        assert!(silhouette_score(&points, &assignments, 2).is_err());
        assert!(davies_bouldin_index(&points, &assignments, 2).is_err());

        println!("[VERIFIED] Unpopulated cluster id rejected by both metrics");
    }
}
