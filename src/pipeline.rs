//! The end-to-end comparison: reference length, alignment, report parsing
//! and metric reduction, run strictly in that order.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::aligner::{self, AlignerConfig, AlignerError, AlignmentReports};
use crate::metrics::{AccuracyReport, MetricsError};
use crate::parsing::{coords, fasta, snps, ParseError};
use crate::utils::validation::{validate_assembly_path, ValidationError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to read reference FASTA: {0}")]
    Reference(#[source] ParseError),

    #[error("Alignment failed: {0}")]
    Aligner(#[from] AlignerError),

    #[error("Failed to parse {report} report: {source}")]
    Report {
        report: &'static str,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Compare `query` against `reference` and compute accuracy metrics.
///
/// # Errors
///
/// Returns a `PipelineError` describing the first stage that failed.
pub fn assembly_accuracy(
    reference: &Path,
    query: &Path,
    config: &AlignerConfig,
) -> Result<AccuracyReport, PipelineError> {
    validate_assembly_path(reference)?;
    validate_assembly_path(query)?;

    let reference_bases =
        fasta::total_sequence_length(reference).map_err(PipelineError::Reference)?;
    info!("Reference length: {reference_bases} bases");

    aligner::check_tools(config)?;
    let reports = aligner::run_alignment(reference, query, config)?;

    summarize_reports(reference_bases, &reports)
}

/// Parse raw aligner reports and reduce them to metrics.
///
/// # Errors
///
/// Returns `PipelineError::Report` if either report is malformed, or
/// `PipelineError::Metrics` if the metrics are undefined for the input.
pub fn summarize_reports(
    reference_bases: u64,
    reports: &AlignmentReports,
) -> Result<AccuracyReport, PipelineError> {
    let blocks = coords::parse_coords_text(&reports.coords).map_err(|source| {
        PipelineError::Report {
            report: "coordinate",
            source,
        }
    })?;
    let differences =
        snps::parse_snps_text(&reports.snps).map_err(|source| PipelineError::Report {
            report: "difference",
            source,
        })?;
    debug!(
        "Parsed {} aligned blocks and {} differences",
        blocks.len(),
        differences.len()
    );

    Ok(AccuracyReport::compute(
        reference_bases,
        &blocks,
        &differences,
    )?)
}
