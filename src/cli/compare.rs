use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::aligner::AlignerConfig;
use crate::cli::OutputFormat;
use crate::metrics::AccuracyReport;
use crate::pipeline::assembly_accuracy;

#[derive(Args)]
pub struct CompareArgs {
    /// Reference assembly.
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Query assembly.
    #[arg(required = true)]
    pub query: PathBuf,

    /// nucmer executable
    #[arg(long, default_value = "nucmer", help_heading = "MUMmer")]
    pub nucmer: PathBuf,

    /// delta-filter executable
    #[arg(long, default_value = "delta-filter", help_heading = "MUMmer")]
    pub delta_filter: PathBuf,

    /// show-snps executable
    #[arg(long, default_value = "show-snps", help_heading = "MUMmer")]
    pub show_snps: PathBuf,

    /// show-coords executable
    #[arg(long, default_value = "show-coords", help_heading = "MUMmer")]
    pub show_coords: PathBuf,

    /// Continue when a MUMmer tool exits with a non-zero status
    #[arg(long, help_heading = "MUMmer")]
    pub ignore_tool_status: bool,
}

impl CompareArgs {
    #[must_use]
    pub fn aligner_config(&self) -> AlignerConfig {
        AlignerConfig {
            nucmer: self.nucmer.clone(),
            delta_filter: self.delta_filter.clone(),
            show_snps: self.show_snps.clone(),
            show_coords: self.show_coords.clone(),
            check_exit_status: !self.ignore_tool_status,
            ..AlignerConfig::default()
        }
    }
}

/// Compare the assemblies and print the report to stdout.
///
/// Raising `interrupted` stops the aligner chain at the next step boundary.
pub fn run(
    args: CompareArgs,
    format: OutputFormat,
    interrupted: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let config = AlignerConfig {
        interrupted,
        ..args.aligner_config()
    };

    let report = assembly_accuracy(&args.reference, &args.query, &config).with_context(|| {
        format!(
            "Failed to compare {} against {}",
            args.query.display(),
            args.reference.display()
        )
    })?;

    info!(
        "Coverage {:.2}%, {} mismatches, {} indels",
        report.coverage, report.num_mismatches, report.num_indels
    );

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Tsv => print!("{}", report.to_tsv()),
    }

    Ok(())
}

fn print_json(report: &AccuracyReport) -> anyhow::Result<()> {
    println!("{}", report.to_json()?);
    Ok(())
}
