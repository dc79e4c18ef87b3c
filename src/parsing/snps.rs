//! Parser for `show-snps -rlTHC` reports.
//!
//! Each headerless, tab separated row describes one differing site. The
//! second and third columns hold the reference and query symbols; a `.` on
//! either side marks an inserted or deleted base.

use crate::parsing::ParseError;

/// Symbol used by `show-snps` for the missing side of an indel.
pub const GAP_SYMBOL: &str = ".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceKind {
    Substitution,
    Indel,
}

/// A single differing site between reference and query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDifference {
    pub ref_base: String,
    pub query_base: String,
}

impl SiteDifference {
    #[must_use]
    pub fn new(ref_base: impl Into<String>, query_base: impl Into<String>) -> Self {
        Self {
            ref_base: ref_base.into(),
            query_base: query_base.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DifferenceKind {
        if self.ref_base == GAP_SYMBOL || self.query_base == GAP_SYMBOL {
            DifferenceKind::Indel
        } else {
            DifferenceKind::Substitution
        }
    }
}

/// Tally of differences by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifferenceCounts {
    pub mismatches: u64,
    pub indels: u64,
}

impl DifferenceCounts {
    #[must_use]
    pub fn from_differences(differences: &[SiteDifference]) -> Self {
        let mut counts = Self::default();
        for difference in differences {
            match difference.kind() {
                DifferenceKind::Substitution => counts.mismatches += 1,
                DifferenceKind::Indel => counts.indels += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.mismatches + self.indels
    }
}

/// Parse the text of a difference report.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a non-blank row has fewer than 3 fields.
pub fn parse_snps_text(text: &str) -> Result<Vec<SiteDifference>, ParseError> {
    let mut differences = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Difference line {} has fewer than 3 fields",
                i + 1
            )));
        }

        differences.push(SiteDifference::new(fields[1], fields[2]));
    }

    Ok(differences)
}
