use crate::{
    bed::Bed,
    cli::Args,
    consts::{BED_FILE, EXT_FASTA_FILE, FASTA_FILE, LENGTH_FILE},
    error::Result,
    extract::{extend_sequence, Bedtools, FastaRecord, SequenceExtractor},
    isoform::Isoform,
};

use flate2::read::MultiGzDecoder;
use log::{info, warn};
use rayon::prelude::*;

use std::{
    fs::{create_dir_all, File},
    io::{stdin, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Everything derived from one description line: the per-exon BED12 record
/// and the union-covered length.
struct IsoformRecord {
    line: String,
    bed: Bed,
    covered: u64,
}

/// Main processing function that orchestrates record building and
/// sequence extraction with the production `bedtools` collaborator.
pub fn xcirc(args: Args) -> Result<()> {
    let extractor = Bedtools::new(args.bedtools_bin.as_str());
    run(args, &extractor)
}

/// Same pipeline with an injected extraction collaborator, so the interval
/// algebra can be exercised without spawning a subprocess.
pub fn run<E: SequenceExtractor>(args: Args, extractor: &E) -> Result<()> {
    let Args {
        genome,
        isoforms,
        outdir,
        ignore_errors,
        ..
    } = args;

    create_dir_all(&outdir)?;

    let lines = read_isoform_lines(&isoforms)?;
    info!(
        "Read {} isoform descriptions from {}",
        lines.len(),
        isoforms.display()
    );

    let records = build_records(&lines, ignore_errors)?;

    write_bed(&outdir.join(BED_FILE), &records)?;
    write_lengths(&outdir.join(LENGTH_FILE), &records)?;

    let beds: Vec<Bed> = records.into_iter().map(|r| r.bed).collect();
    let sequences = extractor.extract(&beds, &genome)?;
    info!("Extracted {} sequences", sequences.len());

    write_sequences(&outdir, &sequences)?;

    info!("Wrote isoform data to {}", outdir.display());

    Ok(())
}

/// Reads description lines from a file, a gzipped file, or stdin (`-`),
/// stripping line terminators and skipping blank lines.
fn read_isoform_lines(path: &Path) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
        Box::new(BufReader::new(stdin()))
    } else {
        let file = File::open(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Box::new(BufReader::new(MultiGzDecoder::new(file))),
            _ => Box::new(BufReader::new(file)),
        }
    };

    let mut lines = Vec::new();
    for line in reader.lines() {
        let mut line = line?;

        if line.ends_with('\r') {
            line.pop();
        }

        if line.is_empty() {
            continue;
        }

        lines.push(line);
    }

    Ok(lines)
}

/// Builds all per-isoform records in parallel, preserving input line order.
/// In `ignore_errors` mode per-line failures are logged and skipped;
/// anything else aborts.
fn build_records(lines: &[String], ignore_errors: bool) -> Result<Vec<IsoformRecord>> {
    let results: Vec<Result<IsoformRecord>> =
        lines.par_iter().map(|line| build_record(line)).collect();

    let mut records = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(record) => records.push(record),
            Err(e) if ignore_errors && e.is_per_isoform() => {
                warn!("Skipping isoform: {}", e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(records)
}

fn build_record(line: &str) -> Result<IsoformRecord> {
    let isoform = Isoform::parse(line)?;

    let bed = isoform.to_bed(line)?;
    let covered = isoform.to_union_bed(line)?.covered_length();

    Ok(IsoformRecord {
        line: line.to_string(),
        bed,
        covered,
    })
}

fn write_bed(path: &Path, records: &[IsoformRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    for record in records {
        writeln!(writer, "{}", record.bed.to_bed12())?;
    }

    writer.flush()?;
    Ok(())
}

fn write_lengths(path: &Path, records: &[IsoformRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    for record in records {
        writeln!(writer, "{}\t{}", record.line, record.covered)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the plain and junction-extended FASTA files, one record pair per
/// extracted sequence, header = the original description line.
fn write_sequences(outdir: &Path, sequences: &[FastaRecord]) -> Result<()> {
    let mut plain = BufWriter::new(File::create(outdir.join(FASTA_FILE))?);
    let mut extended = BufWriter::new(File::create(outdir.join(EXT_FASTA_FILE))?);

    for record in sequences {
        writeln!(plain, ">{}", record.name)?;
        writeln!(plain, "{}", record.seq)?;

        writeln!(extended, ">{}", record.name)?;
        writeln!(extended, "{}", extend_sequence(&record.seq))?;
    }

    plain.flush()?;
    extended.flush()?;
    Ok(())
}
