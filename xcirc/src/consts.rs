//! turn compact circular-isoform descriptions into BED12 + spliced sequences using bedtools
//! Alejandro Gonzales-Irribarren, 2025

/// Bases re-appended to the start of each extracted sequence so reads can
/// span the backsplice junction of a circular isoform.
pub const JUNCTION_OVERLAP: usize = 30;

pub const BED_FILE: &str = "isoforms.bed";
pub const LENGTH_FILE: &str = "isoforms.length.tsv";
pub const FASTA_FILE: &str = "isoforms.fa";
pub const EXT_FASTA_FILE: &str = "isoforms.ext.fa";

/// Separator between the chrom/starts/ends/strand fields of a description.
pub const FIELD_SEP: char = '|';
/// Separator between coordinates inside the starts/ends fields.
pub const COORD_SEP: char = ',';

/// BED score placeholder; xcirc never scores records.
pub const BED_SCORE: &str = ".";
/// BED itemRgb placeholder.
pub const BED_ITEM_RGB: &str = "0";
