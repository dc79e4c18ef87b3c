use serde::Serialize;
use tracing::{debug, warn};

use crate::metrics::MetricsError;
use crate::parsing::coords::{aligned_bases, count_overlaps, AlignedBlock};
use crate::parsing::snps::{DifferenceCounts, SiteDifference};

/// Convert a base count to f64 for ratio calculations
///
/// Genome-scale counts are far below 2^53, so the conversion is exact in practice.
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Round to two decimal places.
///
/// Rounds the exact binary value, with exact ties going to the even digit,
/// so `0.125` becomes `0.12` and `0.375` becomes `0.38`. Infinite values
/// pass through unchanged.
#[must_use]
pub fn round2(value: f64) -> f64 {
    if value.is_finite() {
        format!("{value:.2}").parse().unwrap_or(value)
    } else {
        value
    }
}

/// Phred-scaled quality for an error rate.
///
/// A zero error rate is a perfect match and scores positive infinity.
#[must_use]
pub fn qscore_from_error_rate(error_rate: f64) -> f64 {
    if error_rate > 0.0 {
        -10.0 * error_rate.log10()
    } else {
        f64::INFINITY
    }
}

/// Summary accuracy metrics for a query assembly against a reference.
///
/// Only the four headline fields are serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    /// Q-score rounded to two decimals, `inf` for a perfect match
    pub qscore: f64,

    /// Percent of reference bases covered by aligned blocks, rounded to two decimals
    pub coverage: f64,

    pub num_mismatches: u64,

    pub num_indels: u64,

    #[serde(skip)]
    pub reference_bases: u64,

    #[serde(skip)]
    pub aligned_bases: u64,

    /// Unrounded error rate
    #[serde(skip)]
    pub error_rate: f64,
}

impl AccuracyReport {
    /// Reduce parsed reports to accuracy metrics.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::EmptyReference` if `reference_bases` is zero, or
    /// `MetricsError::NoAlignedBases` if the blocks span no bases.
    pub fn compute(
        reference_bases: u64,
        blocks: &[AlignedBlock],
        differences: &[SiteDifference],
    ) -> Result<Self, MetricsError> {
        if reference_bases == 0 {
            return Err(MetricsError::EmptyReference);
        }

        let aligned = aligned_bases(blocks);
        if aligned == 0 {
            return Err(MetricsError::NoAlignedBases);
        }

        let overlaps = count_overlaps(blocks);
        if overlaps > 0 {
            warn!(
                "{overlaps} of {} aligned blocks overlap another block; overlapping bases are counted more than once and coverage may be overstated",
                blocks.len()
            );
        }

        let counts = DifferenceCounts::from_differences(differences);
        let coverage = 100.0 * count_to_f64(aligned) / count_to_f64(reference_bases);
        let error_rate = count_to_f64(counts.total()) / count_to_f64(aligned);
        let qscore = qscore_from_error_rate(error_rate);

        debug!(
            "reference_bases={reference_bases} aligned_bases={aligned} mismatches={} indels={} error_rate={error_rate}",
            counts.mismatches, counts.indels
        );

        Ok(Self {
            qscore: round2(qscore),
            coverage: round2(coverage),
            num_mismatches: counts.mismatches,
            num_indels: counts.indels,
            reference_bases,
            aligned_bases: aligned,
            error_rate,
        })
    }

    /// True when no differences were found in the aligned blocks.
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.num_mismatches == 0 && self.num_indels == 0
    }
}
