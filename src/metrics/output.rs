//! Rendering of an [`AccuracyReport`] for stdout.
//!
//! The JSON form mirrors what Python's `json.dumps` produces for the same
//! record, including the bare `Infinity` token for a perfect-match Q-score,
//! so existing downstream consumers keep parsing it unchanged.

use std::fmt::Write as _;
use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

use crate::metrics::AccuracyReport;

/// JSON formatter using `", "` / `": "` separators on a single line.
///
/// serde_json hands non-finite floats to the formatter as `null`; they are
/// written as `Infinity` instead.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn write_null<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"Infinity")
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

impl AccuracyReport {
    /// Single-line JSON object with the four headline metrics.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut serializer)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Human-readable multi-line summary.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Assembly Accuracy");
        let _ = writeln!(out, "{}", "=".repeat(60));
        let _ = writeln!(out, "  Reference bases: {}", self.reference_bases);
        let _ = writeln!(out, "  Aligned bases: {}", self.aligned_bases);
        let _ = writeln!(out, "  Coverage: {:.2}%", self.coverage);
        let _ = writeln!(out, "  Mismatches: {}", self.num_mismatches);
        let _ = writeln!(out, "  Indels: {}", self.num_indels);
        let _ = writeln!(out, "  Error rate: {:.6}", self.error_rate);
        let _ = writeln!(out, "  Q-score: {}", format_qscore(self.qscore));
        if self.is_perfect() {
            let _ = writeln!(out, "  No differences in aligned blocks");
        }
        out
    }

    /// Header line plus one tab separated row.
    #[must_use]
    pub fn to_tsv(&self) -> String {
        format!(
            "qscore\tcoverage\tnum_mismatches\tnum_indels\n{}\t{:.2}\t{}\t{}\n",
            format_qscore(self.qscore),
            self.coverage,
            self.num_mismatches,
            self.num_indels,
        )
    }
}

fn format_qscore(qscore: f64) -> String {
    if qscore.is_infinite() {
        "inf".to_string()
    } else {
        format!("{qscore:.2}")
    }
}
