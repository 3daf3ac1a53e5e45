//! Numeric core for clustering regional health-indicator records.
//!
//! Groups region-year observations (diabetes patient counts, insurance
//! enrollment, clinic counts) into a caller-chosen number of clusters,
//! scores the partition, and produces a 2D projection plus per-cluster
//! statistics for downstream display.
//!
//! # Pipeline
//!
//! ```text
//! raw rows -> coercion -> standardization -> k-means
//!                                              |
//!                     +------------------------+------------------------+
//!                     v                        v                        v
//!               quality metrics          PCA projection          aggregation
//! ```
//!
//! Ingestion of the source spreadsheet, interactive controls, and chart
//! rendering are external collaborators: they hand raw rows in and consume
//! the structured [`pipeline::PipelineResult`].
//!
//! Every invocation is stateless and deterministic for a given
//! `(dataset, k, seed)`.
//!
//! # Example
//!
//! ```
//! use health_cluster_core::{ClusterPipeline, PipelineConfig, RawRecord};
//! use serde_json::json;
//!
//! let rows = vec![
//!     RawRecord::new("bogor", 2020, json!(100), json!(1000), json!(5)),
//!     RawRecord::new("depok", 2020, json!(110), json!(1050), json!(6)),
//!     RawRecord::new("bandung", 2021, json!(500), json!(4000), json!(20)),
//!     RawRecord::new("cirebon", 2021, json!(520), json!(4100), json!(22)),
//! ];
//!
//! let config = PipelineConfig::with_k(2)?;
//! let result = ClusterPipeline::new().run(&rows, &config)?;
//! assert_eq!(result.records.len(), 4);
//! # Ok::<(), health_cluster_core::PipelineError>(())
//! ```

pub mod aggregate;
pub mod cluster;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod preprocess;
pub mod projection;
pub mod quality;
pub mod types;

pub use aggregate::{ClusterSummary, FeatureSummary};
pub use cluster::{KMeansClustering, KMeansOutcome, LloydKMeans};
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{ClusterPipeline, PipelineResult, RecordResult};
pub use preprocess::ScalingParams;
pub use projection::Projection;
pub use types::{RawRecord, Record};
