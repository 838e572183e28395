//! turn compact circular-isoform descriptions into BED12 + spliced sequences using bedtools
//! Alejandro Gonzales-Irribarren, 2025

use std::str::FromStr;

use crate::bed::Bed;
use crate::consts::{COORD_SEP, FIELD_SEP};
use crate::error::{Error, FormatError, Result, ValidationError};
use crate::interval::Region;
use crate::strand::Strand;

/// One isoform description: `chrom|s1,..,sn|e1,..,en|strand`, coordinates
/// 1-based closed. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isoform {
    pub chrom: String,
    pub starts: Vec<u64>,
    pub ends: Vec<u64>,
    pub strand: Strand,
}

impl Isoform {
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(FIELD_SEP).collect();
        if fields.len() != 4 {
            return Err(Error::format(line, FormatError::FieldCount(fields.len())));
        }

        let starts = parse_coordinates(fields[1]).map_err(|e| Error::format(line, e))?;
        let ends = parse_coordinates(fields[2]).map_err(|e| Error::format(line, e))?;
        let strand = Strand::from_str(fields[3]).map_err(|e| Error::format(line, e))?;

        Ok(Self {
            chrom: fields[0].to_string(),
            starts,
            ends,
            strand,
        })
    }

    /// Per-exon record backing the BED output: one block per exon, blocks
    /// in description order (reversed for minus-strand isoforms).
    pub fn to_bed(&self, name: &str) -> Result<Bed> {
        self.validate(name)?;
        Ok(Bed::from_regions(&self.regions(), name)?)
    }

    /// Union-merged record; its covered length is the isoform's total
    /// exonic span without double-counting overlaps.
    pub fn to_union_bed(&self, name: &str) -> Result<Bed> {
        self.validate(name)?;
        Ok(Bed::from_union(&self.regions(), name)?)
    }

    fn validate(&self, line: &str) -> Result<()> {
        if self.starts.is_empty() {
            return Err(Error::validation(line, ValidationError::NoExons));
        }

        if self.starts.len() != self.ends.len() {
            return Err(Error::validation(
                line,
                ValidationError::CoordinateCount {
                    starts: self.starts.len(),
                    ends: self.ends.len(),
                },
            ));
        }

        for (&start, &end) in self.starts.iter().zip(self.ends.iter()) {
            if start == 0 {
                return Err(Error::validation(line, ValidationError::ZeroStart));
            }

            if start > end {
                return Err(Error::validation(
                    line,
                    ValidationError::InvertedExon { start, end },
                ));
            }
        }

        Ok(())
    }

    fn regions(&self) -> Vec<Region> {
        self.starts
            .iter()
            .zip(self.ends.iter())
            .map(|(&start, &end)| Region::new(self.chrom.clone(), start, end, self.strand))
            .collect()
    }
}

fn parse_coordinates(field: &str) -> std::result::Result<Vec<u64>, FormatError> {
    field
        .split(COORD_SEP)
        .map(|token| {
            token
                .parse::<u64>()
                .map_err(|_| FormatError::Coordinate(token.to_string()))
        })
        .collect()
}
