//! Helper functions for building deterministic test point sets.

use crate::types::Point;

/// Two well-separated groups of `per_group` points each, with a small
/// deterministic spread inside each group.
pub fn two_groups(per_group: usize) -> Vec<Point> {
    let mut points = Vec::with_capacity(per_group * 2);
    for i in 0..per_group {
        let jitter = i as f64 * 0.01;
        points.push([-2.0 + jitter, -2.0 - jitter, -2.0 + jitter]);
    }
    for i in 0..per_group {
        let jitter = i as f64 * 0.01;
        points.push([2.0 + jitter, 2.0 - jitter, 2.0 + jitter]);
    }
    points
}

/// Three compact groups of five points around distinct centers.
pub fn three_groups() -> Vec<Point> {
    let centers: [Point; 3] = [[-3.0, 0.0, 3.0], [0.0, 3.0, -3.0], [3.0, -3.0, 0.0]];
    let mut points = Vec::new();
    for center in centers {
        for i in 0..5 {
            let offset = i as f64 * 0.05;
            points.push([center[0] + offset, center[1] - offset, center[2] + offset]);
        }
    }
    points
}

/// A spread-out line of n distinct points.
pub fn line(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            [t, t * 0.5, -t]
        })
        .collect()
}
