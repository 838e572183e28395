#![cfg(unix)]

use std::fs::File;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use flate2::{write::GzEncoder, Compression};
use tempfile::TempDir;
use xcirc::{run, xcirc, Args, Bed, FastaRecord, SequenceExtractor};

const ISOFORMS: &str = "chr1|1,10,32|5,20,50|+\nchr3|30,45|40,60|-\n";

const SEQ: &str = "ACGTACGTACGTACGTACGTACGTACGTACGTACGT";

const EXPECTED_BED: &str = "\
chr1\t0\t50\tchr1|1,10,32|5,20,50|+\t.\t+\t0\t50\t0\t3\t5,11,19\t0,9,31
chr3\t29\t60\tchr3|30,45|40,60|-\t.\t-\t29\t60\t0\t2\t16,11\t15,0
";

const EXPECTED_LENGTHS: &str = "\
chr1|1,10,32|5,20,50|+\t35
chr3|30,45|40,60|-\t27
";

/// Stand-in for `bedtools getfasta`: reads the handed-over BED file and
/// answers every record with a fixed sequence, name decorated the way the
/// real tool decorates it under `-name -s`.
const BEDTOOLS_STUB: &str = "#!/bin/sh
bed=\"\"
fo=\"\"
while [ \"$#\" -gt 0 ]; do
    case \"$1\" in
        -bed) bed=\"$2\"; shift 2 ;;
        -fo) fo=\"$2\"; shift 2 ;;
        *) shift ;;
    esac
done
: > \"$fo\"
while IFS=\"\t\" read -r chrom start end name score strand rest; do
    printf '%s::%s:%s-%s(%s)\\t%s\\n' \"$name\" \"$chrom\" \"$start\" \"$end\" \"$strand\" \"ACGTACGTACGTACGTACGTACGTACGTACGTACGT\" >> \"$fo\"
done < \"$bed\"
";

struct Case {
    gz: bool,
}

fn write_stub(root: &Path) -> PathBuf {
    let path = root.join("bedtools-stub");
    std::fs::write(&path, BEDTOOLS_STUB)
        .unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));

    let mut perms = std::fs::metadata(&path)
        .unwrap_or_else(|e| panic!("failed to stat {}: {}", path.display(), e))
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms)
        .unwrap_or_else(|e| panic!("failed to chmod {}: {}", path.display(), e));

    path
}

fn write_isoforms(root: &Path, content: &str, gz: bool) -> PathBuf {
    if !gz {
        let path = root.join("isoforms.txt");
        std::fs::write(&path, content)
            .unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));
        return path;
    }

    let path = root.join("isoforms.txt.gz");
    let file = File::create(&path)
        .unwrap_or_else(|e| panic!("failed to create {}: {}", path.display(), e));
    let mut writer = GzEncoder::new(file, Compression::default());

    writer
        .write_all(content.as_bytes())
        .unwrap_or_else(|e| panic!("failed to write gzip content: {}", e));
    writer
        .finish()
        .unwrap_or_else(|e| panic!("failed to finish gzip file: {}", e));

    path
}

fn args(root: &Path, isoforms: PathBuf, outdir: PathBuf, ignore_errors: bool) -> Args {
    let genome = root.join("genome.fa");
    std::fs::write(&genome, ">chr1\nAACCGGTT\n")
        .unwrap_or_else(|e| panic!("failed to write {}: {}", genome.display(), e));

    Args {
        genome,
        isoforms,
        outdir,
        bedtools_bin: write_stub(root).display().to_string(),
        ignore_errors,
        level: log::Level::Info,
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

fn run_case(case: Case) {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let root = temp.path();

    let isoforms = write_isoforms(root, ISOFORMS, case.gz);
    let outdir = root.join("out");

    xcirc(args(root, isoforms, outdir.clone(), false)).expect("pipeline failed");

    assert_eq!(read(&outdir.join("isoforms.bed")), EXPECTED_BED);
    assert_eq!(read(&outdir.join("isoforms.length.tsv")), EXPECTED_LENGTHS);

    let expected_fa = format!(
        ">chr1|1,10,32|5,20,50|+\n{SEQ}\n>chr3|30,45|40,60|-\n{SEQ}\n"
    );
    assert_eq!(read(&outdir.join("isoforms.fa")), expected_fa);

    let ext = format!("{}{}", SEQ, &SEQ[..30]);
    let expected_ext = format!(
        ">chr1|1,10,32|5,20,50|+\n{ext}\n>chr3|30,45|40,60|-\n{ext}\n"
    );
    assert_eq!(read(&outdir.join("isoforms.ext.fa")), expected_ext);
}

#[test]
fn test_pipeline_plain_input() {
    run_case(Case { gz: false });
}

#[test]
fn test_pipeline_gz_input() {
    run_case(Case { gz: true });
}

#[test]
fn test_pipeline_strict_mode_aborts_on_bad_line() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let root = temp.path();

    let isoforms = write_isoforms(root, "chr1|1|5|+\nnot-an-isoform\n", false);
    let outdir = root.join("out");

    let result = xcirc(args(root, isoforms, outdir, false));
    assert!(result.is_err(), "strict mode must abort on a malformed line");
}

#[test]
fn test_pipeline_ignore_errors_skips_bad_lines() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let root = temp.path();

    let isoforms = write_isoforms(
        root,
        "not-an-isoform\nchr1|1,10,32|5,20,50|+\nchr9|50|20|+\n",
        false,
    );
    let outdir = root.join("out");

    xcirc(args(root, isoforms, outdir.clone(), true)).expect("pipeline failed");

    assert_eq!(
        read(&outdir.join("isoforms.bed")),
        "chr1\t0\t50\tchr1|1,10,32|5,20,50|+\t.\t+\t0\t50\t0\t3\t5,11,19\t0,9,31\n"
    );
    assert_eq!(
        read(&outdir.join("isoforms.length.tsv")),
        "chr1|1,10,32|5,20,50|+\t35\n"
    );
}

#[test]
fn test_pipeline_fails_when_extractor_is_missing() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let root = temp.path();

    let isoforms = write_isoforms(root, ISOFORMS, false);
    let outdir = root.join("out");

    let mut args = args(root, isoforms, outdir, false);
    args.bedtools_bin = root.join("no-such-bedtools").display().to_string();

    let result = xcirc(args);
    assert!(result.is_err(), "a missing extractor must surface as an error");
}

/// Answers every record with a fixed sequence, no subprocess involved.
struct FixedExtractor;

impl SequenceExtractor for FixedExtractor {
    fn extract(&self, records: &[Bed], _genome: &Path) -> xcirc::Result<Vec<FastaRecord>> {
        Ok(records
            .iter()
            .map(|record| FastaRecord {
                name: record.name.clone(),
                seq: "AACC".to_string(),
            })
            .collect())
    }
}

#[test]
fn test_run_with_injected_extractor() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let root = temp.path();

    let isoforms = write_isoforms(root, ISOFORMS, false);
    let outdir = root.join("out");

    run(args(root, isoforms, outdir.clone(), false), &FixedExtractor).expect("pipeline failed");

    assert_eq!(
        read(&outdir.join("isoforms.fa")),
        ">chr1|1,10,32|5,20,50|+\nAACC\n>chr3|30,45|40,60|-\nAACC\n"
    );
    assert_eq!(
        read(&outdir.join("isoforms.ext.fa")),
        ">chr1|1,10,32|5,20,50|+\nAACCAACC\n>chr3|30,45|40,60|-\nAACCAACC\n"
    );
}
