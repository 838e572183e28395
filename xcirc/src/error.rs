//! turn compact circular-isoform descriptions into BED12 + spliced sequences using bedtools
//! Alejandro Gonzales-Irribarren, 2025

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// A description line that cannot be parsed at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("expected 4 '|'-delimited fields, found {0}")]
    FieldCount(usize),

    #[error("coordinate '{0}' is not a number")]
    Coordinate(String),

    #[error("strand must be '+' or '-', found '{0}'")]
    Strand(String),
}

/// A parsed isoform whose coordinates cannot describe a set of exons.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{starts} start coordinates but {ends} end coordinates")]
    CoordinateCount { starts: usize, ends: usize },

    #[error("exon start {start} is greater than its end {end}")]
    InvertedExon { start: u64, end: u64 },

    #[error("coordinates are 1-based, found a zero start")]
    ZeroStart,

    #[error("isoform defines no exons")]
    NoExons,
}

/// Regions handed to the union that do not belong to one feature.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("not all regions in the same chromosome")]
    Chromosome,

    #[error("not all regions at the same strand")]
    Strand,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse isoform '{line}': {source}")]
    Format { line: String, source: FormatError },

    #[error("invalid isoform '{line}': {source}")]
    Validation { line: String, source: ValidationError },

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error("cannot run '{bin}': {source}")]
    ExtractorSpawn { bin: String, source: io::Error },

    #[error("'{bin}' exited with {status}")]
    ExtractorStatus { bin: String, status: ExitStatus },

    #[error("malformed extractor output line '{0}': expected '<name>\\t<sequence>'")]
    ExtractorOutput(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn format(line: &str, source: FormatError) -> Self {
        Error::Format {
            line: line.to_string(),
            source,
        }
    }

    pub fn validation(line: &str, source: ValidationError) -> Self {
        Error::Validation {
            line: line.to_string(),
            source,
        }
    }

    /// Failures scoped to a single description line. Everything else
    /// (consistency, extraction, io) aborts the run even with
    /// `--ignore-errors`.
    pub fn is_per_isoform(&self) -> bool {
        matches!(self, Error::Format { .. } | Error::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
