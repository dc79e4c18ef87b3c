//! Reduction of alignment reports into accuracy metrics.
//!
//! ## Formulas
//!
//! | Metric | Definition |
//! |--------|------------|
//! | coverage | `100 * aligned_bases / reference_bases` |
//! | error rate | `(mismatches + indels) / aligned_bases` |
//! | Q-score | `-10 * log10(error_rate)`, infinite when the error rate is zero |
//!
//! `aligned_bases` is the plain sum of every coordinate block's length, so
//! overlapping blocks inflate coverage. A warning is logged when overlaps
//! are present.

use thiserror::Error;

pub mod accuracy;
pub mod output;

pub use accuracy::{qscore_from_error_rate, round2, AccuracyReport};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    #[error("Reference contains no bases; coverage is undefined")]
    EmptyReference,

    #[error("No aligned bases reported; error rate is undefined")]
    NoAlignedBases,
}
