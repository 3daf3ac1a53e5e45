//! Per-cluster descriptive statistics over raw feature values.

use serde::Serialize;

use crate::types::{Record, FEATURE_DIM};

/// Sum and arithmetic mean of one raw feature within a cluster.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureSummary {
    /// Sum of the raw feature over cluster members.
    pub sum: f64,
    /// Arithmetic mean of the raw feature over cluster members.
    pub mean: f64,
}

/// Descriptive statistics for one realized cluster.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterSummary {
    /// Cluster id. Not a stable semantic label across runs, seeds, or k.
    pub cluster: usize,
    /// Number of member records.
    pub members: usize,
    /// Diabetes patient counts.
    pub patients: FeatureSummary,
    /// Insurance enrollment counts.
    pub insured: FeatureSummary,
    /// Clinic counts.
    pub clinics: FeatureSummary,
}

/// Compute one summary per realized cluster id, in ascending id order.
///
/// Statistics are over raw (non-standardized) feature values. Clusters with
/// zero members are skipped; the cluster engine's reseeding policy means
/// they do not occur in pipeline output.
pub fn summarize(records: &[Record], assignments: &[usize], k: usize) -> Vec<ClusterSummary> {
    let mut counts = vec![0usize; k];
    let mut sums = vec![[0.0f64; FEATURE_DIM]; k];

    for (record, &cluster) in records.iter().zip(assignments) {
        counts[cluster] += 1;
        let f = record.features();
        for (s, v) in sums[cluster].iter_mut().zip(f) {
            *s += v;
        }
    }

    (0..k)
        .filter(|&c| counts[c] > 0)
        .map(|c| {
            let n = counts[c] as f64;
            let summary = |sum: f64| FeatureSummary { sum, mean: sum / n };
            ClusterSummary {
                cluster: c,
                members: counts[c],
                patients: summary(sums[c][0]),
                insured: summary(sums[c][1]),
                clinics: summary(sums[c][2]),
            }
        })
        .collect()
}

/// Sorted distinct observation years in the dataset.
pub fn distinct_years(records: &[Record]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(Record::year).collect();
    years.sort_unstable();
    years.dedup();
    years
}
