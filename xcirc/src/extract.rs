//! turn compact circular-isoform descriptions into BED12 + spliced sequences using bedtools
//! Alejandro Gonzales-Irribarren, 2025

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::Command;

use log::info;
use tempfile::NamedTempFile;

use crate::bed::Bed;
use crate::consts::JUNCTION_OVERLAP;
use crate::error::{Error, Result};

/// One named sequence produced by the extraction collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub name: String,
    pub seq: String,
}

/// Strand-aware, block-spliced sequence extraction from a reference genome.
///
/// Implementations must return one record per input record, with `name`
/// equal to the input record's name (any tool decoration stripped) and
/// `seq` reverse-complemented on the minus strand and concatenated across
/// blocks in block order.
pub trait SequenceExtractor {
    fn extract(&self, records: &[Bed], genome: &Path) -> Result<Vec<FastaRecord>>;
}

/// `bedtools getfasta` as the extraction collaborator.
///
/// Records are handed over and results read back through temp files that
/// are removed on every exit path, including panics.
pub struct Bedtools {
    bin: String,
}

impl Bedtools {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl SequenceExtractor for Bedtools {
    fn extract(&self, records: &[Bed], genome: &Path) -> Result<Vec<FastaRecord>> {
        let mut bed = NamedTempFile::new()?;
        for record in records {
            writeln!(bed, "{}", record.to_bed12())?;
        }
        bed.flush()?;

        let out = NamedTempFile::new()?;

        info!(
            "Running {} getfasta over {} records",
            self.bin,
            records.len()
        );

        let status = Command::new(&self.bin)
            .arg("getfasta")
            .arg("-fi")
            .arg(genome)
            .arg("-bed")
            .arg(bed.path())
            .arg("-fo")
            .arg(out.path())
            .arg("-name")
            .arg("-s")
            .arg("-tab")
            .arg("-split")
            .status()
            .map_err(|e| Error::ExtractorSpawn {
                bin: self.bin.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(Error::ExtractorStatus {
                bin: self.bin.clone(),
                status,
            });
        }

        parse_tab_output(out.path())
    }
}

/// Reparses `getfasta -tab` output: one `<name>\t<sequence>` line per
/// record, names stripped back to the original record name.
fn parse_tab_output(path: &Path) -> Result<Vec<FastaRecord>> {
    let reader = BufReader::new(File::open(path)?);

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let (name, seq) = line
            .split_once('\t')
            .ok_or_else(|| Error::ExtractorOutput(line.clone()))?;

        records.push(FastaRecord {
            name: strip_name_decoration(name).to_string(),
            seq: seq.to_string(),
        });
    }

    Ok(records)
}

/// Undoes the decoration `getfasta -name -s` appends to record names: a
/// trailing `(+)`/`(-)` and the `::chrom:start-end` coordinate suffix.
pub fn strip_name_decoration(name: &str) -> &str {
    let name = name
        .strip_suffix("(+)")
        .or_else(|| name.strip_suffix("(-)"))
        .unwrap_or(name);

    match name.split_once("::") {
        Some((stripped, _)) => stripped,
        None => name,
    }
}

/// Appends the wrap-around junction prefix: the first
/// [`JUNCTION_OVERLAP`] bases of the sequence, or the whole sequence when
/// it is shorter. `extended[..seq.len()] == seq` always holds.
pub fn extend_sequence(seq: &str) -> String {
    let overlap = seq.len().min(JUNCTION_OVERLAP);

    let mut extended = String::with_capacity(seq.len() + overlap);
    extended.push_str(seq);
    extended.push_str(&seq[..overlap]);

    extended
}
