use std::ffi::OsString;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, info, warn};

use crate::aligner::{AlignerConfig, AlignerError, AlignmentReports};

const OUTPUT_PREFIX: &str = "nucmer_output";

/// Number of trailing stderr lines kept when a tool fails
const STDERR_TAIL_LINES: usize = 20;

/// Align `query` against `reference` and return the difference and
/// coordinate reports.
///
/// All intermediate files live in a temporary directory that is removed
/// when this function returns, whether it succeeds or fails.
///
/// # Errors
///
/// Returns `AlignerError::Spawn` if a tool cannot be started,
/// `AlignerError::ToolFailed` if a tool exits unsuccessfully while
/// `check_exit_status` is set, `AlignerError::Interrupted` once the
/// interrupt flag is raised, or `AlignerError::Io` for filesystem failures.
pub fn run_alignment(
    reference: &Path,
    query: &Path,
    config: &AlignerConfig,
) -> Result<AlignmentReports, AlignerError> {
    let workdir = tempfile::Builder::new().prefix("asm-diff.").tempdir()?;
    let prefix = workdir.path().join(OUTPUT_PREFIX);
    let delta = with_suffix(&prefix, ".delta");
    let filtered = with_suffix(&prefix, "_filter.delta");

    debug!("Working directory: {}", workdir.path().display());

    info!(
        "Aligning {} against {}",
        query.display(),
        reference.display()
    );
    let mut nucmer = Command::new(&config.nucmer);
    nucmer
        .arg("--maxmatch")
        .arg("-p")
        .arg(&prefix)
        .arg(reference)
        .arg(query);
    run_step(&mut nucmer, config)?;

    let mut delta_filter = Command::new(&config.delta_filter);
    delta_filter
        .arg("-1")
        .arg(&delta)
        .stdout(Stdio::from(File::create(&filtered)?));
    run_step(&mut delta_filter, config)?;

    let mut show_snps = Command::new(&config.show_snps);
    show_snps.arg("-rlTHC").arg(&filtered);
    let snps = capture_stdout(run_step(&mut show_snps, config)?);

    let mut show_coords = Command::new(&config.show_coords);
    show_coords.arg("-THrcl").arg(&filtered);
    let coords = capture_stdout(run_step(&mut show_coords, config)?);

    debug!(
        "Reports: {} difference rows, {} coordinate rows",
        snps.lines().count(),
        coords.lines().count()
    );

    workdir.close()?;

    Ok(AlignmentReports { snps, coords })
}

/// Check that every configured tool can be started.
///
/// # Errors
///
/// Returns `AlignerError::Spawn` for the first tool that is missing.
pub fn check_tools(config: &AlignerConfig) -> Result<(), AlignerError> {
    for tool in config.tools() {
        Command::new(tool)
            .arg("-h")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| AlignerError::Spawn {
                tool: tool.display().to_string(),
                source,
            })?;
    }
    Ok(())
}

fn run_step(command: &mut Command, config: &AlignerConfig) -> Result<Output, AlignerError> {
    let tool = command.get_program().to_string_lossy().to_string();
    if config.is_interrupted() {
        return Err(AlignerError::Interrupted);
    }
    debug!("Running {tool} {:?}", command.get_args().collect::<Vec<_>>());

    let output = command
        .stdin(Stdio::null())
        .output()
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => AlignerError::Spawn {
                tool: tool.clone(),
                source,
            },
            _ => AlignerError::Io(source),
        })?;

    if config.is_interrupted() {
        warn!("Interrupted while {tool} was running");
        return Err(AlignerError::Interrupted);
    }

    if !output.status.success() {
        let stderr = stderr_tail(&output.stderr);
        if config.check_exit_status {
            return Err(AlignerError::ToolFailed {
                tool,
                status: output.status.to_string(),
                stderr,
            });
        }
        warn!("{tool} exited with {}, continuing: {stderr}", output.status);
    }

    Ok(output)
}

fn capture_stdout(output: Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n").trim().to_string()
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut path: OsString = prefix.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}
