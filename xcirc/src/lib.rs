//! turn compact circular-isoform descriptions into BED12 + spliced sequences using bedtools
//! Alejandro Gonzales-Irribarren, 2025
//!
//! This tool reads compact circular-isoform descriptions
//! (`chrom|starts|ends|strand`, 1-based closed coordinates), converts each
//! into a multi-block BED12 record, and drives `bedtools getfasta` to pull
//! the spliced, strand-aware sequence of every isoform out of a reference
//! genome. Besides the interval file it reports each isoform's total
//! exonic length (overlapping exons merged first) and a junction-extended
//! sequence variant for backsplice-spanning alignment.
//!
//! # Usage
//!
//! ```bash
//! Usage: xcirc [OPTIONS] --genome <GENOME> --isoforms <ISOFORMS>
//!
//! Options:
//!   -g, --genome <GENOME>        Path to reference genome file (.fa)
//!   -i, --isoforms <ISOFORMS>    Path to isoform descriptions, one 'chrom|starts|ends|strand'
//!                                per line ('-' for stdin, .gz supported)
//!   -o, --outdir <OUTDIR>        Output directory for interval and sequence files [default: isoform_data]
//!       --bedtools-bin <BEDTOOLS_BIN>  Name or path of the bedtools executable [default: bedtools]
//!   -I, --ignore-errors          Skip malformed isoform lines instead of aborting
//!   -L, --level <LEVEL>          Logging verbosity level [default: info]
//!   -h, --help                   Print help
//!   -V, --version                Print version
//! ```

pub mod bed;
pub mod cli;
pub mod consts;
pub mod core;
pub mod error;
pub mod extract;
pub mod interval;
pub mod isoform;
pub mod strand;

pub use crate::bed::Bed;
pub use crate::cli::Args;
pub use crate::core::{run, xcirc};
pub use crate::error::{ConsistencyError, Error, FormatError, Result, ValidationError};
pub use crate::extract::{extend_sequence, Bedtools, FastaRecord, SequenceExtractor};
pub use crate::interval::{union_regions, Region};
pub use crate::isoform::Isoform;
pub use crate::strand::Strand;
