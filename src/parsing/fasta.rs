//! Streaming FASTA scanner used to total the reference length.
//!
//! Records are produced lazily, one at a time, so whole chromosomes are never
//! held in memory longer than a single record. Supports both uncompressed and
//! gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::parsing::ParseError;

/// A single FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub title: String,
    pub sequence: String,
}

impl SequenceRecord {
    /// Number of residues, counted as characters rather than bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    // Check for gzipped FASTA
    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Lazy, forward-only FASTA record iterator.
///
/// Anything before the first `>` line is ignored, so input without a record
/// marker yields no records at all. Sequence lines are right-trimmed and any
/// embedded spaces or carriage returns are dropped.
pub struct FastaScanner<R: BufRead> {
    reader: R,
    buf: String,
    pending_title: Option<String>,
    started: bool,
    done: bool,
}

impl<R: BufRead> FastaScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            pending_title: None,
            started: false,
            done: false,
        }
    }

    fn read_line(&mut self) -> Result<bool, ParseError> {
        self.buf.clear();
        Ok(self.reader.read_line(&mut self.buf)? > 0)
    }

    fn next_record(&mut self) -> Result<Option<SequenceRecord>, ParseError> {
        if self.done {
            return Ok(None);
        }

        if !self.started {
            self.started = true;
            loop {
                if !self.read_line()? {
                    self.done = true;
                    return Ok(None);
                }
                if let Some(title) = self.buf.strip_prefix('>') {
                    self.pending_title = Some(title.trim_end().to_string());
                    break;
                }
            }
        }

        let Some(title) = self.pending_title.take() else {
            self.done = true;
            return Ok(None);
        };

        let mut sequence = String::new();
        loop {
            if !self.read_line()? {
                self.done = true;
                break;
            }
            if let Some(next_title) = self.buf.strip_prefix('>') {
                self.pending_title = Some(next_title.trim_end().to_string());
                break;
            }
            sequence.extend(
                self.buf
                    .trim_end()
                    .chars()
                    .filter(|&c| c != ' ' && c != '\r'),
            );
        }

        Ok(Some(SequenceRecord { title, sequence }))
    }
}

impl<R: BufRead> Iterator for FastaScanner<R> {
    type Item = Result<SequenceRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Open a FASTA file for scanning, decompressing gzip/bgzip input.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_fasta(path: &Path) -> Result<FastaScanner<Box<dyn BufRead>>, ParseError> {
    let file = File::open(path)?;
    let inner: Box<dyn Read> = if is_gzipped(path) {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let reader: Box<dyn BufRead> = Box::new(BufReader::new(inner));
    Ok(FastaScanner::new(reader))
}

/// Sum the residue counts of every record in a FASTA reader.
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails part way through.
pub fn sum_sequence_lengths<R: BufRead>(reader: R) -> Result<u64, ParseError> {
    sum_records(FastaScanner::new(reader))
}

/// Total number of residues across all records of a FASTA file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened or read.
pub fn total_sequence_length(path: &Path) -> Result<u64, ParseError> {
    sum_records(open_fasta(path)?)
}

fn sum_records<R: BufRead>(scanner: FastaScanner<R>) -> Result<u64, ParseError> {
    let mut total = 0u64;
    let mut records = 0usize;
    for record in scanner {
        total += record?.len() as u64;
        records += 1;
    }
    debug!("Scanned {records} FASTA records totalling {total} bases");
    Ok(total)
}
