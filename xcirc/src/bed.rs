//! turn compact circular-isoform descriptions into BED12 + spliced sequences using bedtools
//! Alejandro Gonzales-Irribarren, 2025

use crate::consts::{BED_ITEM_RGB, BED_SCORE};
use crate::error::ConsistencyError;
use crate::interval::{union_regions, Region};
use crate::strand::Strand;

/// A region rebased to BED coordinates: 0-based half-open, end kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NormalizedBlock {
    start: u64,
    end: u64,
}

/// Rebases one source region (1-based, closed) to BED coordinates.
/// Starts must already be validated as 1-based.
fn normalize_region(region: &Region) -> NormalizedBlock {
    debug_assert!(region.start > 0, "source coordinates are 1-based");

    NormalizedBlock {
        start: region.start - 1,
        end: region.end,
    }
}

/// One multi-block BED12 record.
///
/// `block_starts` are offsets relative to `start`; block order is whatever
/// order the regions were folded in, which is genomic order only on the
/// union path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bed {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub name: String,
    pub strand: Strand,
    pub block_sizes: Vec<u64>,
    pub block_starts: Vec<u64>,
}

impl Bed {
    /// Builds a record with one block per region, in caller-supplied order.
    ///
    /// When the first region sits on the minus strand the whole list is
    /// reversed first, so blocks follow the transcript 5'->3' rather than
    /// the genome. The union path does not do this; see [`Bed::from_union`].
    pub fn from_regions(regions: &[Region], name: &str) -> Result<Self, ConsistencyError> {
        match regions.first().map(|r| r.strand) {
            Some(Strand::Reverse) => {
                let reversed: Vec<Region> = regions.iter().rev().cloned().collect();
                Self::fold(&reversed, name)
            }
            _ => Self::fold(regions, name),
        }
    }

    /// Builds a record whose blocks are the union-merged regions, in
    /// genomic order regardless of strand.
    pub fn from_union(regions: &[Region], name: &str) -> Result<Self, ConsistencyError> {
        let merged = union_regions(regions)?;
        Self::fold(&merged, name)
    }

    /// Two-pass fold: the first pass fixes the envelope over all blocks,
    /// the second computes each block's size and offset against that final
    /// envelope. Correct for ascending, descending, or unsorted input.
    fn fold(regions: &[Region], name: &str) -> Result<Self, ConsistencyError> {
        let seed = regions
            .first()
            .unwrap_or_else(|| panic!("ERROR: cannot build a BED record from zero regions"));

        if regions.iter().any(|r| r.strand != seed.strand) {
            return Err(ConsistencyError::Strand);
        }

        let blocks: Vec<NormalizedBlock> = regions.iter().map(normalize_region).collect();

        let (start, end) = blocks
            .iter()
            .fold((u64::MAX, 0), |(start, end), b| {
                (start.min(b.start), end.max(b.end))
            });

        let block_sizes = blocks.iter().map(|b| b.end - b.start).collect();
        let block_starts = blocks.iter().map(|b| b.start - start).collect();

        Ok(Self {
            chrom: seed.chrom.clone(),
            start,
            end,
            name: name.to_string(),
            strand: seed.strand,
            block_sizes,
            block_starts,
        })
    }

    pub fn block_count(&self) -> usize {
        self.block_sizes.len()
    }

    /// Total number of positions covered by the blocks. Only meaningful on
    /// the union path, where blocks cannot overlap.
    pub fn covered_length(&self) -> u64 {
        self.block_sizes.iter().sum()
    }

    /// Renders the 6 mandatory BED fields.
    pub fn to_bed6(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.name, BED_SCORE, self.strand
        )
    }

    /// Renders the full 12-field record, reusing the envelope for
    /// thickStart/thickEnd.
    pub fn to_bed12(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.to_bed6(),
            self.start,
            self.end,
            BED_ITEM_RGB,
            self.block_count(),
            join_csv(&self.block_sizes),
            join_csv(&self.block_starts)
        )
    }
}

fn join_csv(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<String>>()
        .join(",")
}
