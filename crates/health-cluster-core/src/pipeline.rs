//! End-to-end clustering pipeline.
//!
//! Raw rows flow linearly through coercion, standardization, and k-means;
//! the labeled matrix then fans out to the quality metrics, the PCA
//! projection, and the per-cluster aggregation, which consume it
//! independently. Each invocation is synchronous, single-threaded, and
//! stateless: nothing is retained between calls.

use serde::Serialize;
use tracing::info;

use crate::aggregate::{distinct_years, summarize, ClusterSummary};
use crate::cluster::{KMeansClustering, LloydKMeans};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::preprocess::{coerce_records, standardize};
use crate::projection::{project_2d, N_COMPONENTS};
use crate::quality::{davies_bouldin_index, silhouette_score};
use crate::types::RawRecord;

/// One record in pipeline output, in input order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordResult {
    /// Region identifier.
    pub region: String,
    /// Observation year.
    pub year: i32,
    /// Raw diabetes patient count.
    pub patients: f64,
    /// Raw insurance enrollment count.
    pub insured: f64,
    /// Raw clinic count.
    pub clinics: f64,
    /// Assigned cluster id in `[0, k)`.
    pub cluster: usize,
    /// 2D PCA coordinates for plotting.
    pub projection: [f64; N_COMPONENTS],
}

/// Complete result of one pipeline invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineResult {
    /// Labeled records, order matching the surviving input rows.
    pub records: Vec<RecordResult>,

    /// Mean silhouette score of the partition, in `[-1, 1]`.
    pub silhouette: f64,

    /// Davies-Bouldin index of the partition, `>= 0`.
    pub davies_bouldin: f64,

    /// Variance fraction captured by each retained principal component.
    pub explained_variance: [f64; N_COMPONENTS],

    /// Per-cluster raw-feature statistics, ascending cluster id.
    pub summaries: Vec<ClusterSummary>,

    /// Sorted distinct observation years.
    pub years: Vec<i32>,

    /// K-means iterations executed.
    pub iterations: usize,

    /// Whether k-means converged before the iteration cap.
    pub converged: bool,

    /// Within-cluster sum of squares of the final partition.
    pub inertia: f64,
}

/// Stateless entry point for the numeric analysis pipeline.
#[derive(Clone, Debug, Default)]
pub struct ClusterPipeline;

impl ClusterPipeline {
    /// Create a new pipeline.
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline over raw rows.
    ///
    /// Rows failing numeric coercion are silently dropped before analysis.
    ///
    /// # Errors
    ///
    /// - `EmptyDataset` if no rows survive coercion.
    /// - `DegenerateFeature` if a feature column has zero variance.
    /// - `InsufficientData` if `config.k` exceeds the distinct points.
    /// - `DegenerateClustering` if a quality metric is undefined for the
    ///   realized partition.
    pub fn run(&self, raw: &[RawRecord], config: &PipelineConfig) -> Result<PipelineResult> {
        let records = coerce_records(raw);
        let (matrix, _params) = standardize(&records)?;

        let outcome = LloydKMeans::new().cluster(&matrix, config)?;

        let silhouette = silhouette_score(&matrix, &outcome.assignments, config.k)?;
        let davies_bouldin = davies_bouldin_index(&matrix, &outcome.assignments, config.k)?;
        let projection = project_2d(&matrix)?;
        let summaries = summarize(&records, &outcome.assignments, config.k);
        let years = distinct_years(&records);

        let record_results = records
            .iter()
            .zip(&outcome.assignments)
            .zip(&projection.points)
            .map(|((record, &cluster), &coords)| RecordResult {
                region: record.region().to_string(),
                year: record.year(),
                patients: record.patients(),
                insured: record.insured(),
                clinics: record.clinics(),
                cluster,
                projection: coords,
            })
            .collect();

        info!(
            n = records.len(),
            k = config.k,
            iterations = outcome.iterations,
            converged = outcome.converged,
            silhouette,
            davies_bouldin,
            "pipeline run complete"
        );

        Ok(PipelineResult {
            records: record_results,
            silhouette,
            davies_bouldin,
            explained_variance: projection.explained_variance,
            summaries,
            years,
            iterations: outcome.iterations,
            converged: outcome.converged,
            inertia: outcome.inertia,
        })
    }
}
