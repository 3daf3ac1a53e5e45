//! Core data types for the clustering pipeline.
//!
//! A [`RawRecord`] is one region-year row as handed over by the ingestion
//! collaborator, with loosely-typed feature cells. A [`Record`] is the coerced
//! form the numeric pipeline operates on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of feature columns the pipeline clusters on.
pub const FEATURE_DIM: usize = 3;

/// Feature column names, in matrix column order.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = ["patients", "insured", "clinics"];

/// A point in feature space (raw or standardized).
pub type Point = [f64; FEATURE_DIM];

/// One raw region-year row.
///
/// The three feature cells arrive loosely typed (numbers or numeric strings,
/// depending on how the source spreadsheet was filled in). Coercion happens
/// in [`crate::preprocess::coerce_records`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawRecord {
    /// Region identifier (e.g. a district name).
    pub region: String,
    /// Observation year.
    pub year: i32,
    /// Diabetes patient count cell.
    pub patients: Value,
    /// Insurance enrollment cell.
    pub insured: Value,
    /// Clinic count cell.
    pub clinics: Value,
}

impl RawRecord {
    /// Create a raw record from loosely-typed feature cells.
    pub fn new(
        region: impl Into<String>,
        year: i32,
        patients: Value,
        insured: Value,
        clinics: Value,
    ) -> Self {
        Self {
            region: region.into(),
            year,
            patients,
            insured,
            clinics,
        }
    }
}

/// One coerced region-year observation. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    region: String,
    year: i32,
    patients: f64,
    insured: f64,
    clinics: f64,
}

impl Record {
    /// Create a record from already-coerced feature values.
    pub fn new(
        region: impl Into<String>,
        year: i32,
        patients: f64,
        insured: f64,
        clinics: f64,
    ) -> Self {
        Self {
            region: region.into(),
            year,
            patients,
            insured,
            clinics,
        }
    }

    /// Region identifier.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Observation year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Diabetes patient count.
    pub fn patients(&self) -> f64 {
        self.patients
    }

    /// Insurance enrollment count.
    pub fn insured(&self) -> f64 {
        self.insured
    }

    /// Clinic count.
    pub fn clinics(&self) -> f64 {
        self.clinics
    }

    /// Raw feature vector in matrix column order.
    #[inline]
    pub fn features(&self) -> Point {
        [self.patients, self.insured, self.clinics]
    }
}
