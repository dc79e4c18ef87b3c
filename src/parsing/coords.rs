//! Parser for `show-coords -THrcl` reports.
//!
//! With those flags each row is tab separated, headerless, and laid out as:
//!
//! | Column | Field |
//! |--------|-------|
//! | 1, 2   | reference start / end (1-based, inclusive) |
//! | 3, 4   | query start / end |
//! | 5, 6   | aligned length on reference / query |
//! | 7      | percent identity |
//! | 8, 9   | reference / query sequence length |
//! | 10, 11 | reference / query coverage |
//! | 12, 13 | reference / query tag |
//!
//! Only the reference range is needed for coverage; the reference tag is kept
//! so overlapping blocks can be reported.

use std::collections::HashMap;

use crate::parsing::ParseError;

const REF_TAG_COLUMN: usize = 11;

/// One aligned block projected onto the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedBlock {
    pub ref_start: u64,
    pub ref_end: u64,
    pub ref_tag: Option<String>,
}

#[allow(clippy::len_without_is_empty)] // A block always spans at least one base
impl AlignedBlock {
    #[must_use]
    pub fn new(ref_start: u64, ref_end: u64) -> Self {
        Self {
            ref_start,
            ref_end,
            ref_tag: None,
        }
    }

    /// Number of reference bases spanned, both ends inclusive.
    ///
    /// Endpoints given in descending order span the same bases as ascending.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.ref_end.abs_diff(self.ref_start) + 1
    }
}

/// Parse the text of a coordinate report.
///
/// Blank lines are skipped. Fields are split on any whitespace.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has fewer than 2 fields,
/// a coordinate is not an integer, or the end precedes the start.
pub fn parse_coords_text(text: &str) -> Result<Vec<AlignedBlock>, ParseError> {
    let mut blocks = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() < 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Coordinate line {line_num} has fewer than 2 fields"
            )));
        }

        let ref_start = parse_coordinate(fields[0], line_num)?;
        let ref_end = parse_coordinate(fields[1], line_num)?;
        if ref_end < ref_start {
            return Err(ParseError::InvalidFormat(format!(
                "Coordinate line {line_num} ends ({ref_end}) before it starts ({ref_start})"
            )));
        }

        blocks.push(AlignedBlock {
            ref_start,
            ref_end,
            ref_tag: fields.get(REF_TAG_COLUMN).map(|s| (*s).to_string()),
        });
    }

    Ok(blocks)
}

fn parse_coordinate(field: &str, line_num: usize) -> Result<u64, ParseError> {
    field.parse().map_err(|_| {
        ParseError::InvalidFormat(format!(
            "Invalid coordinate on line {line_num}: '{field}'"
        ))
    })
}

/// Total aligned reference bases.
///
/// Overlapping blocks are summed independently, so a base covered by two
/// blocks is counted twice.
#[must_use]
pub fn aligned_bases(blocks: &[AlignedBlock]) -> u64 {
    blocks.iter().map(AlignedBlock::len).sum()
}

/// Number of blocks that overlap another block on the same reference sequence.
///
/// Blocks without a tag are grouped together.
#[must_use]
pub fn count_overlaps(blocks: &[AlignedBlock]) -> usize {
    let mut by_tag: HashMap<Option<&str>, Vec<(u64, u64)>> = HashMap::new();
    for block in blocks {
        by_tag
            .entry(block.ref_tag.as_deref())
            .or_default()
            .push((block.ref_start, block.ref_end));
    }

    let mut overlaps = 0;
    for ranges in by_tag.values_mut() {
        ranges.sort_unstable();
        let mut furthest_end: Option<u64> = None;
        for &(start, end) in ranges.iter() {
            if furthest_end.is_some_and(|e| start <= e) {
                overlaps += 1;
            }
            furthest_end = Some(furthest_end.map_or(end, |e| e.max(end)));
        }
    }
    overlaps
}
