//! Input path checks run before any external tool is started.

use std::path::Path;

use tracing::warn;

use crate::parsing::fasta::is_fasta_file;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Input file not found: {0}")]
    NotFound(String),
    #[error("Input is not a regular file: {0}")]
    NotAFile(String),
    #[error("Cannot read input file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Check that an assembly path names a readable regular file.
///
/// Paths without a recognised FASTA extension are accepted with a warning,
/// since the aligner decides what it can read.
///
/// # Errors
///
/// Returns `ValidationError::NotFound` if nothing exists at the path,
/// `ValidationError::NotAFile` for directories and other non-files, or
/// `ValidationError::Unreadable` if the file cannot be opened.
pub fn validate_assembly_path(path: &Path) -> Result<(), ValidationError> {
    let path_str = path.display().to_string();

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ValidationError::NotFound(path_str));
        }
        Err(source) => {
            return Err(ValidationError::Unreadable {
                path: path_str,
                source,
            })
        }
    };

    if !metadata.is_file() {
        return Err(ValidationError::NotAFile(path_str));
    }

    std::fs::File::open(path).map_err(|source| ValidationError::Unreadable {
        path: path_str.clone(),
        source,
    })?;

    if !is_fasta_file(path) {
        warn!("{path_str} does not have a FASTA extension (.fa, .fasta, .fna)");
    }

    Ok(())
}
