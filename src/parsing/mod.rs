//! Parsers for the inputs and reports consumed by the accuracy pipeline.
//!
//! This module provides parsers for:
//!
//! - **FASTA files**: Stream records to total the reference length
//! - **show-coords reports**: Aligned reference ranges (`show-coords -THrcl`)
//! - **show-snps reports**: Per-site differences (`show-snps -rlTHC`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use asm_diff::parsing::coords::{aligned_bases, parse_coords_text};
//! use asm_diff::parsing::fasta::total_sequence_length;
//! use std::path::Path;
//!
//! let reference_bases = total_sequence_length(Path::new("reference.fa")).unwrap();
//! let blocks = parse_coords_text("1\t1000\t1\t1000\n").unwrap();
//! assert_eq!(aligned_bases(&blocks), 1000);
//! # let _ = reference_bases;
//! ```

use thiserror::Error;

pub mod coords;
pub mod fasta;
pub mod snps;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid report format: {0}")]
    InvalidFormat(String),
}
