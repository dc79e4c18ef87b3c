//! End-to-end tests of the `asm-diff` binary.
//!
//! The MUMmer tools are replaced with small shell scripts that emit canned
//! reports, so these tests run without MUMmer installed.

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn write_fasta(dir: &Path, name: &str, bases: usize) -> PathBuf {
    let path = dir.join(name);
    let sequence: String = "ACGT".chars().cycle().take(bases).collect();
    let wrapped: Vec<String> = sequence
        .as_bytes()
        .chunks(60)
        .map(|c| String::from_utf8_lossy(c).to_string())
        .collect();
    fs::write(&path, format!(">contig_1\n{}\n", wrapped.join("\n"))).unwrap();
    path
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Stand-in MUMmer install whose report generators print fixed text.
#[cfg(unix)]
struct FakeMummer {
    dir: TempDir,
}

#[cfg(unix)]
impl FakeMummer {
    fn new(snps: &str, coords: &str) -> Self {
        let dir = tempdir().unwrap();
        write_script(
            dir.path(),
            "nucmer",
            "prefix=''\n\
             while [ $# -gt 0 ]; do\n  if [ \"$1\" = \"-p\" ]; then shift; prefix=\"$1\"; fi\n  shift\ndone\n\
             [ -z \"$prefix\" ] && exit 0\n\
             echo delta > \"$prefix.delta\"",
        );
        write_script(dir.path(), "delta-filter", "[ -f \"$2\" ] && cat \"$2\"\nexit 0");
        write_script(dir.path(), "show-snps", &format!("printf '{snps}'"));
        write_script(dir.path(), "show-coords", &format!("printf '{coords}'"));
        Self { dir }
    }

    fn tool(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn replace(&self, name: &str, body: &str) {
        write_script(self.dir.path(), name, body);
    }

    fn command(&self, reference: &Path, query: &Path) -> Command {
        let mut cmd = Command::cargo_bin("asm-diff").unwrap();
        cmd.arg(reference)
            .arg(query)
            .arg("--nucmer")
            .arg(self.tool("nucmer"))
            .arg("--delta-filter")
            .arg(self.tool("delta-filter"))
            .arg("--show-snps")
            .arg(self.tool("show-snps"))
            .arg("--show-coords")
            .arg(self.tool("show-coords"));
        cmd
    }
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("asm-diff").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args() {
    let mut cmd = Command::cargo_bin("asm-diff").unwrap();
    cmd.assert().failure().code(2).stderr(str::contains("Usage"));
}

#[test]
fn test_help_lists_positionals() {
    let mut cmd = Command::cargo_bin("asm-diff").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(str::contains("<REFERENCE>"))
        .stdout(str::contains("Reference assembly"))
        .stdout(str::contains("<QUERY>"))
        .stdout(str::contains("Query assembly"));
}

#[test]
fn test_missing_reference() {
    let dir = tempdir().unwrap();
    let query = write_fasta(dir.path(), "query.fa", 100);

    let mut cmd = Command::cargo_bin("asm-diff").unwrap();
    cmd.arg(dir.path().join("missing.fa"))
        .arg(&query)
        .assert()
        .failure()
        .code(1)
        .stdout(str::is_empty())
        .stderr(str::contains("Input file not found"));
}

#[test]
fn test_missing_aligner() {
    let dir = tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", 100);
    let query = write_fasta(dir.path(), "query.fa", 100);

    let mut cmd = Command::cargo_bin("asm-diff").unwrap();
    cmd.arg(&reference)
        .arg(&query)
        .arg("--nucmer")
        .arg(dir.path().join("no-such-nucmer"))
        .assert()
        .failure()
        .stderr(str::contains("install MUMmer"));
}

#[cfg(unix)]
#[test]
fn test_identical_assemblies() {
    let dir = tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", 1000);
    let query = write_fasta(dir.path(), "query.fa", 1000);
    let mummer = FakeMummer::new(
        "",
        "1\\t1000\\t1\\t1000\\t1000\\t1000\\t100.00\\t1000\\t1000\\t100.00\\t100.00\\tcontig_1\\tcontig_1\\n",
    );

    mummer
        .command(&reference, &query)
        .assert()
        .success()
        .stdout(
            r#"{"qscore": Infinity, "coverage": 100.0, "num_mismatches": 0, "num_indels": 0}
"#,
        );
}

#[cfg(unix)]
#[test]
fn test_half_aligned_with_indel() {
    let dir = tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", 1000);
    let query = write_fasta(dir.path(), "query.fa", 500);
    let mummer = FakeMummer::new("250\\tA\\t.\\t250\\n", "1\\t500\\n");

    mummer
        .command(&reference, &query)
        .assert()
        .success()
        .stdout(
            r#"{"qscore": 26.99, "coverage": 50.0, "num_mismatches": 0, "num_indels": 1}
"#,
        );
}

#[cfg(unix)]
#[test]
fn test_tsv_format() {
    let dir = tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", 1000);
    let query = write_fasta(dir.path(), "query.fa", 1000);
    let mummer = FakeMummer::new("10\\tA\\tC\\t10\\n20\\tG\\tT\\t20\\n", "1\\t1000\\n");

    mummer
        .command(&reference, &query)
        .arg("--format")
        .arg("tsv")
        .assert()
        .success()
        .stdout("qscore\tcoverage\tnum_mismatches\tnum_indels\n26.99\t100.00\t2\t0\n");
}

#[cfg(unix)]
#[test]
fn test_verbose_logs_stay_off_stdout() {
    let dir = tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", 1000);
    let query = write_fasta(dir.path(), "query.fa", 1000);
    let mummer = FakeMummer::new("", "1\\t1000\\n");

    mummer
        .command(&reference, &query)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(str::starts_with("{\"qscore\"").and(str::contains("Reference length").not()))
        .stderr(str::contains("Reference length: 1000 bases"));
}

#[cfg(unix)]
#[test]
fn test_tool_failure_is_fatal() {
    let dir = tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", 1000);
    let query = write_fasta(dir.path(), "query.fa", 1000);
    let mummer = FakeMummer::new("", "1\\t1000\\n");
    mummer.replace(
        "show-snps",
        "[ \"$1\" = \"-h\" ] && exit 0\necho 'ERROR: Could not open delta file' >&2\nexit 1",
    );

    mummer
        .command(&reference, &query)
        .assert()
        .failure()
        .stdout(str::is_empty())
        .stderr(str::contains("Could not open delta file"));
}

#[cfg(unix)]
#[test]
fn test_ignore_tool_status() {
    let dir = tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", 1000);
    let query = write_fasta(dir.path(), "query.fa", 1000);
    let mummer = FakeMummer::new("", "1\\t1000\\n");
    mummer.replace("show-snps", "exit 1");

    mummer
        .command(&reference, &query)
        .arg("--ignore-tool-status")
        .assert()
        .success()
        .stdout(str::contains("\"num_mismatches\": 0"));
}

#[cfg(unix)]
#[test]
fn test_no_alignments_is_an_error() {
    let dir = tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", 1000);
    let query = write_fasta(dir.path(), "query.fa", 1000);
    let mummer = FakeMummer::new("", "");

    mummer
        .command(&reference, &query)
        .assert()
        .failure()
        .stderr(str::contains("No aligned bases"));
}

#[cfg(unix)]
#[test]
fn test_reference_without_records_is_an_error() {
    let dir = tempdir().unwrap();
    let reference = dir.path().join("ref.fa");
    fs::write(&reference, "ACGTACGT\n").unwrap();
    let query = write_fasta(dir.path(), "query.fa", 8);
    let mummer = FakeMummer::new("", "1\\t8\\n");

    mummer
        .command(&reference, &query)
        .assert()
        .failure()
        .stderr(str::contains("Reference contains no bases"));
}

#[cfg(unix)]
#[test]
fn test_interrupt_removes_working_directory() {
    use std::os::unix::process::CommandExt;
    use std::process::Stdio;
    use std::thread;
    use std::time::{Duration, Instant};

    let dir = tempdir().unwrap();
    let scratch = tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", 1000);
    let query = write_fasta(dir.path(), "query.fa", 1000);
    let started = dir.path().join("nucmer.started");

    let mummer = FakeMummer::new("", "1\\t1000\\n");
    mummer.replace(
        "nucmer",
        &format!(
            "[ \"$1\" = \"-h\" ] && exit 0\ntouch '{}'\nexec sleep 30",
            started.display()
        ),
    );

    let mut child = std::process::Command::new(assert_cmd::cargo::cargo_bin("asm-diff"))
        .arg(&reference)
        .arg(&query)
        .arg("--nucmer")
        .arg(mummer.tool("nucmer"))
        .arg("--delta-filter")
        .arg(mummer.tool("delta-filter"))
        .arg("--show-snps")
        .arg(mummer.tool("show-snps"))
        .arg("--show-coords")
        .arg(mummer.tool("show-coords"))
        .env("TMPDIR", scratch.path())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(20);
    while !started.exists() {
        assert!(Instant::now() < deadline, "nucmer never started");
        thread::sleep(Duration::from_millis(20));
    }
    let workdirs = |path: &Path| {
        fs::read_dir(path)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("asm-diff."))
            .count()
    };
    assert_eq!(workdirs(scratch.path()), 1);

    // Signal the whole group, as a terminal Ctrl-C would
    let status = std::process::Command::new("kill")
        .args(["-INT", "--", &format!("-{}", child.id())])
        .status()
        .unwrap();
    assert!(status.success());

    let status = loop {
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() > deadline {
            child.kill().unwrap();
            panic!("asm-diff did not exit after SIGINT");
        }
        thread::sleep(Duration::from_millis(20));
    };

    assert!(!status.success());
    assert_eq!(workdirs(scratch.path()), 0);
}
