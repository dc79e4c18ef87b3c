//! # asm-diff
//!
//! Alignment-based accuracy metrics for a genome assembly.
//!
//! Given a reference assembly and a query assembly (for example a polished
//! draft), `asm-diff` aligns the two with MUMmer and reduces the alignment
//! reports to four numbers:
//!
//! - **Q-score**: `-10 * log10(error_rate)` where the error rate is
//!   `(mismatches + indels) / aligned_bases`; infinite for a perfect match
//! - **Coverage**: percent of reference bases inside aligned blocks
//! - **Mismatches**: substituted sites
//! - **Indels**: sites with a base on only one side
//!
//! Alignment itself is delegated to `nucmer`, `delta-filter`, `show-snps`
//! and `show-coords`, which must be installed.
//!
//! ## Example
//!
//! ```rust,no_run
//! use asm_diff::{assembly_accuracy, AlignerConfig};
//! use std::path::Path;
//!
//! let report = assembly_accuracy(
//!     Path::new("reference.fa"),
//!     Path::new("polished.fa"),
//!     &AlignerConfig::default(),
//! )
//! .unwrap();
//!
//! println!("{}", report.to_json().unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`parsing`]: FASTA scanning and MUMmer report parsers
//! - [`aligner`]: MUMmer subprocess chain in a scoped working directory
//! - [`metrics`]: Coverage, error rate and Q-score reduction
//! - [`pipeline`]: The end-to-end comparison
//! - [`cli`]: Command-line interface implementation

pub mod aligner;
pub mod cli;
pub mod metrics;
pub mod parsing;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types for convenience
pub use aligner::{AlignerConfig, AlignmentReports};
pub use metrics::AccuracyReport;
pub use pipeline::{assembly_accuracy, PipelineError};
