//! turn compact circular-isoform descriptions into BED12 + spliced sequences using bedtools
//! Alejandro Gonzales-Irribarren, 2025

use clap::{ArgAction, Parser};
use log::Level;

use std::{fmt, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Args {
    /// Path to reference genome file (.fa)
    #[arg(short = 'g', long)]
    pub genome: PathBuf,

    /// Path to isoform descriptions, one 'chrom|starts|ends|strand' per line ('-' for stdin, .gz supported)
    #[arg(short = 'i', long)]
    pub isoforms: PathBuf,

    /// Output directory for interval and sequence files
    #[arg(short = 'o', long, default_value = "isoform_data")]
    pub outdir: PathBuf,

    /// Name or path of the bedtools executable
    #[arg(long, default_value = "bedtools")]
    pub bedtools_bin: String,

    /// Skip malformed isoform lines instead of aborting
    #[arg(short = 'I', long, default_value = "false", action = ArgAction::SetTrue)]
    pub ignore_errors: bool,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "info")]
    pub level: Level,
}

/// Formats the Args struct as a comma-separated string of key=value pairs.
///
/// # Arguments
///
/// - `f`: The formatter to write to
///
/// # Example
///
/// ```rust,ignore
/// use xcirc::Args;
/// let args = Args::parse();
/// println!("{}", args);
/// ```
impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "genome={}, isoforms={}, outdir={}, bedtools_bin={}, ignore_errors={}, level={}",
            self.genome.display(),
            self.isoforms.display(),
            self.outdir.display(),
            self.bedtools_bin,
            self.ignore_errors,
            self.level,
        )
    }
}
