//! Invocation of the external MUMmer toolchain.
//!
//! The aligner is run as a chain of subprocesses sharing one temporary
//! working directory:
//!
//! 1. `nucmer --maxmatch` writes `<prefix>.delta`
//! 2. `delta-filter -1` keeps one-to-one alignments in `<prefix>_filter.delta`
//! 3. `show-snps -rlTHC` reports per-site differences
//! 4. `show-coords -THrcl` reports aligned coordinate ranges
//!
//! Only the text reports from steps 3 and 4 leave this module. The delta
//! files are never parsed here and disappear with the working directory.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

pub mod mummer;

pub use mummer::{check_tools, run_alignment};

#[derive(Error, Debug)]
pub enum AlignerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to run '{tool}': {source}. Please install MUMmer (https://mummer4.github.io/) and ensure it's in your PATH")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Interrupted before the alignment finished")]
    Interrupted,
}

/// Executables and behavior of the aligner chain.
#[derive(Debug, Clone)]
pub struct AlignerConfig {
    pub nucmer: PathBuf,
    pub delta_filter: PathBuf,
    pub show_snps: PathBuf,
    pub show_coords: PathBuf,
    /// Treat a non-zero exit status from any tool as an error
    pub check_exit_status: bool,
    /// Set from a signal handler to stop the chain between steps
    pub interrupted: Arc<AtomicBool>,
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            nucmer: PathBuf::from("nucmer"),
            delta_filter: PathBuf::from("delta-filter"),
            show_snps: PathBuf::from("show-snps"),
            show_coords: PathBuf::from("show-coords"),
            check_exit_status: true,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl AlignerConfig {
    /// All configured executables, in pipeline order.
    #[must_use]
    pub fn tools(&self) -> [&PathBuf; 4] {
        [
            &self.nucmer,
            &self.delta_filter,
            &self.show_snps,
            &self.show_coords,
        ]
    }

    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }
}

/// Raw text reports produced by the toolchain.
#[derive(Debug, Clone, Default)]
pub struct AlignmentReports {
    /// Output of `show-snps -rlTHC`
    pub snps: String,
    /// Output of `show-coords -THrcl`
    pub coords: String,
}
