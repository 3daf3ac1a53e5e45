//! PCA projection of the standardized feature space to two components.
//!
//! The feature space is only 3-dimensional, so the eigendecomposition of the
//! covariance matrix is done with a cyclic Jacobi sweep on the symmetric 3x3
//! rather than pulling in a linear-algebra dependency.
//!
//! Principal-axis sign is mathematically arbitrary; each component is
//! canonicalized so its largest-magnitude loading is positive, which makes
//! projections reproducible. Consumers should still rely only on relative
//! structure, not on sign.

use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::types::{Point, FEATURE_DIM};

/// Number of output components.
pub const N_COMPONENTS: usize = 2;

// Jacobi sweep limits. A 3x3 symmetric matrix converges in a handful of
// sweeps; 50 is far beyond what is ever needed.
const JACOBI_MAX_SWEEPS: usize = 50;
const JACOBI_OFF_DIAG_EPSILON: f64 = 1e-24;

type Matrix3 = [[f64; FEATURE_DIM]; FEATURE_DIM];

/// 2D projection of the dataset plus the variance captured per component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Projection {
    /// One `(component-1, component-2)` pair per record, in dataset order.
    pub points: Vec<[f64; N_COMPONENTS]>,

    /// Fraction of total variance captured by each retained component,
    /// in descending order.
    pub explained_variance: [f64; N_COMPONENTS],
}

/// Project the standardized matrix onto its top two principal components.
///
/// # Errors
///
/// `EmptyDataset` if `points` is empty.
pub fn project_2d(points: &[Point]) -> Result<Projection> {
    if points.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    let mean = column_means(points);
    let cov = covariance(points, &mean);
    let (eigenvalues, eigenvectors) = jacobi_eigen(cov);

    // Order eigenpairs by descending eigenvalue
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigenvalues[b].total_cmp(&eigenvalues[a]));

    let mut components = [[0.0f64; FEATURE_DIM]; N_COMPONENTS];
    for (c, &idx) in components.iter_mut().zip(order.iter().take(N_COMPONENTS)) {
        for d in 0..FEATURE_DIM {
            c[d] = eigenvectors[d][idx];
        }
        canonicalize_sign(c);
    }

    let total: f64 = eigenvalues.iter().map(|&v| v.max(0.0)).sum();
    let mut explained_variance = [0.0f64; N_COMPONENTS];
    if total > 0.0 {
        for (e, &idx) in explained_variance.iter_mut().zip(order.iter().take(N_COMPONENTS)) {
            *e = eigenvalues[idx].max(0.0) / total;
        }
    }

    let projected = points
        .iter()
        .map(|row| {
            let mut out = [0.0f64; N_COMPONENTS];
            for (o, component) in out.iter_mut().zip(&components) {
                *o = (0..FEATURE_DIM)
                    .map(|d| (row[d] - mean[d]) * component[d])
                    .sum();
            }
            out
        })
        .collect();

    Ok(Projection {
        points: projected,
        explained_variance,
    })
}

fn column_means(points: &[Point]) -> Point {
    let n = points.len() as f64;
    let mut mean = [0.0f64; FEATURE_DIM];
    for row in points {
        for (m, v) in mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    for m in &mut mean {
        *m /= n;
    }
    mean
}

/// Sample covariance matrix (ddof = 1; falls back to ddof = 0 for a single
/// row so the decomposition still has defined input).
fn covariance(points: &[Point], mean: &Point) -> Matrix3 {
    let denom = if points.len() > 1 {
        (points.len() - 1) as f64
    } else {
        1.0
    };

    let mut cov = [[0.0f64; FEATURE_DIM]; FEATURE_DIM];
    for row in points {
        for i in 0..FEATURE_DIM {
            for j in 0..FEATURE_DIM {
                cov[i][j] += (row[i] - mean[i]) * (row[j] - mean[j]);
            }
        }
    }
    for row in &mut cov {
        for v in row.iter_mut() {
            *v /= denom;
        }
    }
    cov
}

/// Eigendecomposition of a symmetric 3x3 via cyclic Jacobi rotations.
///
/// Returns `(eigenvalues, v)` where column i of `v` is the eigenvector for
/// `eigenvalues[i]`. Unsorted.
fn jacobi_eigen(mut a: Matrix3) -> ([f64; FEATURE_DIM], Matrix3) {
    let mut v: Matrix3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

    for _sweep in 0..JACOBI_MAX_SWEEPS {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        if off < JACOBI_OFF_DIAG_EPSILON {
            break;
        }

        for (p, q) in [(0usize, 1usize), (0, 2), (1, 2)] {
            if a[p][q].abs() < f64::MIN_POSITIVE {
                continue;
            }

            let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
            let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
            let c = 1.0 / (t * t + 1.0).sqrt();
            let s = t * c;

            // A <- R^T A R, applied as column then row updates
            for r in 0..FEATURE_DIM {
                let arp = a[r][p];
                let arq = a[r][q];
                a[r][p] = c * arp - s * arq;
                a[r][q] = s * arp + c * arq;
            }
            for r in 0..FEATURE_DIM {
                let apr = a[p][r];
                let aqr = a[q][r];
                a[p][r] = c * apr - s * aqr;
                a[q][r] = s * apr + c * aqr;
            }

            // Accumulate the rotation into the eigenvector matrix
            for r in 0..FEATURE_DIM {
                let vrp = v[r][p];
                let vrq = v[r][q];
                v[r][p] = c * vrp - s * vrq;
                v[r][q] = s * vrp + c * vrq;
            }
        }
    }

    ([a[0][0], a[1][1], a[2][2]], v)
}

/// Flip a component so its largest-magnitude loading is positive.
fn canonicalize_sign(component: &mut [f64; FEATURE_DIM]) {
    let mut lead = 0;
    for d in 1..FEATURE_DIM {
        if component[d].abs() > component[lead].abs() {
            lead = d;
        }
    }
    if component[lead] < 0.0 {
        for v in component.iter_mut() {
            *v = -*v;
        }
    }
}
