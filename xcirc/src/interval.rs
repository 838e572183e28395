//! turn compact circular-isoform descriptions into BED12 + spliced sequences using bedtools
//! Alejandro Gonzales-Irribarren, 2025

use crate::error::ConsistencyError;
use crate::strand::Strand;

/// One exon-sized genomic segment in source coordinates (1-based, closed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
}

impl Region {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64, strand: Strand) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            strand,
        }
    }
}

/// Merges regions of one feature into the minimal sorted set of
/// non-overlapping regions covering the same positions.
///
/// Regions are sorted by start and swept once: a candidate is emitted only
/// when the next region starts strictly past the candidate's end, so
/// touching regions collapse into one. All inputs must share a single
/// chromosome and strand; the merged output is re-tagged with both.
pub fn union_regions(regions: &[Region]) -> Result<Vec<Region>, ConsistencyError> {
    let first = match regions.first() {
        Some(region) => region,
        None => return Ok(Vec::new()),
    };

    if regions.iter().any(|r| r.chrom != first.chrom) {
        return Err(ConsistencyError::Chromosome);
    }

    if regions.iter().any(|r| r.strand != first.strand) {
        return Err(ConsistencyError::Strand);
    }

    let mut intervals: Vec<(u64, u64)> = regions.iter().map(|r| (r.start, r.end)).collect();
    intervals.sort_by_key(|&(start, _)| start);

    let mut merged = Vec::with_capacity(intervals.len());
    let mut candidate = intervals[0];

    for &(start, end) in &intervals[1..] {
        if candidate.1 < start {
            merged.push(candidate);
            candidate = (start, end);
        } else if candidate.1 < end {
            candidate.1 = end;
        }
    }

    merged.push(candidate);

    Ok(merged
        .into_iter()
        .map(|(start, end)| Region::new(first.chrom.clone(), start, end, first.strand))
        .collect())
}
