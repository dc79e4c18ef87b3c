//! Command-line interface for asm-diff.
//!
//! ## Usage
//!
//! ```text
//! # Compare a polished assembly against a reference (JSON on stdout)
//! asm-diff reference.fa polished.fa
//!
//! # Human-readable summary with progress logging
//! asm-diff reference.fa polished.fa --format text --verbose
//!
//! # Use a MUMmer build outside PATH
//! asm-diff ref.fa query.fa --nucmer /opt/mummer/bin/nucmer --show-snps /opt/mummer/bin/show-snps
//! ```

use clap::Parser;

pub mod compare;

#[derive(Parser)]
#[command(name = "asm-diff")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Compare two assemblies.")]
#[command(
    long_about = "asm-diff aligns a query assembly to a reference with MUMmer (nucmer, delta-filter, show-snps, show-coords) and reports:\n- Q-score: -10*log10((mismatches + indels) / aligned bases)\n- Coverage: percent of reference bases in aligned blocks\n- Mismatch and indel counts"
)]
pub struct Cli {
    #[command(flatten)]
    pub args: compare::CompareArgs,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Tsv,
}
