//! # photoshoot-cli
//!
//! Build a PHOTOSHOOT folder archive from a local schedule file.

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use photoshoot_core::{
    organize_upload, realize_tree, ArchiveStrategy, CsvOptions, OrganizeOptions, Photoshoot,
    ResolutionMode, WorkbookOptions, ARCHIVE_FILE_NAME,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// photoshoot - turn a Day/Group/Student schedule into empty folders
#[derive(Parser, Debug)]
#[command(name = "photoshoot")]
#[command(author, version, about = "Create PHOTOSHOOT folders from a schedule", long_about = None)]
struct Cli {
    /// Schedule file (.xlsx, .xls or .csv)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the zip archive
    #[arg(short, long, value_name = "FILE", default_value = ARCHIVE_FILE_NAME)]
    output: PathBuf,

    /// Also create the folder tree under this directory
    #[arg(long, value_name = "DIR")]
    extract_to: Option<PathBuf>,

    /// Reject tables where one column matches more than one role
    #[arg(long)]
    strict_columns: bool,

    /// Stage the folders on disk before zipping
    #[arg(long)]
    staged: bool,

    /// CSV field delimiter (a single ASCII character, or "tab")
    #[arg(short, long, value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Worksheet to read from a workbook, starting at 1
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    sheet: u16,

    /// Cell text treated as missing; replaces the default markers (repeatable)
    #[arg(long = "na-value", value_name = "TEXT")]
    na_values: Vec<String>,

    /// Keep CSV cells as written instead of reading numbers (keeps "01" as "01")
    #[arg(long)]
    keep_text: bool,

    /// Print the folder paths
    #[arg(short, long)]
    list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> OrganizeOptions {
        let mut csv = CsvOptions::default()
            .with_delimiter(self.delimiter)
            .with_type_inference(!self.keep_text);
        let mut workbook = WorkbookOptions::default().with_worksheet(usize::from(self.sheet - 1));
        if !self.na_values.is_empty() {
            csv = csv.with_na_values(self.na_values.iter().cloned());
            workbook = workbook.with_na_values(self.na_values.iter().cloned());
        }

        OrganizeOptions {
            resolution: if self.strict_columns {
                ResolutionMode::Strict
            } else {
                ResolutionMode::Compatible
            },
            strategy: if self.staged {
                ArchiveStrategy::Staged
            } else {
                ArchiveStrategy::InMemory
            },
            // Local files are not subject to the upload limit
            max_upload_bytes: usize::MAX,
            csv,
            workbook,
            ..OrganizeOptions::default()
        }
    }
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Ok(b'\t');
    }
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("expected a single ASCII character, got {value:?}")),
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    if let Err(e) = run(&cli) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let photoshoot = build(&cli.input, &cli.options())?;

    // Nothing is written until every precondition holds
    if let Some(dir) = &cli.extract_to {
        let existing = dir.join(photoshoot.tree.root());
        if existing.exists() {
            bail!("{} already exists; remove it or pick another directory", existing.display());
        }
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    std::fs::write(&cli.output, &photoshoot.archive)
        .with_context(|| format!("Failed to write archive: {}", cli.output.display()))?;
    info!(output = %cli.output.display(), "wrote archive");

    if let Some(dir) = &cli.extract_to {
        let root = realize_tree(dir, &photoshoot.tree)
            .with_context(|| format!("Failed to create folders under {}", dir.display()))?;
        println!("{} {}", "Created".green().bold(), root.display());
    }

    if cli.list {
        for path in photoshoot.tree.paths() {
            println!("{path}");
        }
    }

    println!(
        "{} {} ({} folders)",
        "Wrote".green().bold(),
        cli.output.display(),
        photoshoot.tree.len()
    );

    Ok(())
}

/// Read a schedule file and build its archive.
fn build(input: &Path, options: &OrganizeOptions) -> Result<Photoshoot> {
    let bytes = std::fs::read(input)
        .with_context(|| format!("Failed to read file: {}", input.display()))?;
    let filename = input.file_name().map(|name| name.to_string_lossy());

    organize_upload(filename.as_deref(), &bytes, options)
        .with_context(|| format!("Failed to organize {}", input.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tempfile::tempdir;

    fn write_schedule(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "Day,Group,Student\nMon,Red,Alice\nMon,Red,Bob\n").unwrap();
        path
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["photoshoot", "schedule.csv"]);

        assert_eq!(cli.output, PathBuf::from("PHOTOSHOOT.zip"));
        assert!(cli.extract_to.is_none());
        let options = cli.options();
        assert_eq!(options.resolution, ResolutionMode::Compatible);
        assert_eq!(options.strategy, ArchiveStrategy::InMemory);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "photoshoot",
            "schedule.xlsx",
            "-o",
            "out.zip",
            "--strict-columns",
            "--staged",
            "--list",
        ]);

        assert_eq!(cli.output, PathBuf::from("out.zip"));
        assert!(cli.list);
        let options = cli.options();
        assert_eq!(options.resolution, ResolutionMode::Strict);
        assert_eq!(options.strategy, ArchiveStrategy::Staged);
    }

    #[test]
    fn test_run_writes_archive_and_folders() {
        let dir = tempdir().unwrap();
        let input = write_schedule(dir.path(), "schedule.csv");
        let output = dir.path().join("out.zip");
        let extract = dir.path().join("folders");

        let cli = Cli::parse_from([
            OsString::from("photoshoot"),
            input.into_os_string(),
            OsString::from("-o"),
            output.clone().into_os_string(),
            OsString::from("--extract-to"),
            extract.clone().into_os_string(),
        ]);
        run(&cli).unwrap();

        let archive = std::fs::read(&output).unwrap();
        assert!(archive.starts_with(b"PK"));
        assert!(extract.join("PHOTOSHOOT/Mon/Red/Alice").is_dir());
        assert!(extract.join("PHOTOSHOOT/Mon/Red/Group Final").is_dir());

        // A second extraction must not clobber the existing folders nor
        // leave a fresh archive behind
        std::fs::remove_file(&output).unwrap();
        let err = run(&cli).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(extract.join("PHOTOSHOOT/Mon/Red/Alice").is_dir());
        assert!(!output.exists());
    }

    #[test]
    fn test_reader_flags() {
        let cli = Cli::parse_from([
            "photoshoot",
            "schedule.csv",
            "--delimiter",
            "tab",
            "--sheet",
            "2",
            "--na-value",
            "-",
            "--keep-text",
        ]);
        let options = cli.options();

        assert_eq!(options.csv.delimiter, b'\t');
        assert!(!options.csv.infer_types);
        assert_eq!(options.csv.na_values, ["-"]);
        assert_eq!(options.workbook.worksheet, 1);
        assert_eq!(options.workbook.na_values, ["-"]);

        assert!(Cli::try_parse_from(["photoshoot", "s.csv", "--sheet", "0"]).is_err());
        assert!(Cli::try_parse_from(["photoshoot", "s.csv", "--delimiter", ";;"]).is_err());
    }

    #[test]
    fn test_build_with_semicolons_and_leading_zeros() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("schedule.csv");
        std::fs::write(&input, "Day;Group;Student\n01;Red;Alice\n").unwrap();

        let cli = Cli::parse_from(["photoshoot", "schedule.csv", "-d", ";", "--keep-text"]);
        let photoshoot = build(&input, &cli.options()).unwrap();

        assert!(photoshoot.tree.contains("PHOTOSHOOT/01/Red/Alice"));
    }

    #[cfg(unix)]
    #[test]
    fn test_build_non_utf8_file_name() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let input = dir
            .path()
            .join(std::ffi::OsStr::from_bytes(b"sched\xffule.csv"));
        std::fs::write(&input, "Day,Group,Student\nMon,Red,Alice\n").unwrap();

        let photoshoot = build(&input, &OrganizeOptions::default()).unwrap();
        assert!(photoshoot.tree.contains("PHOTOSHOOT/Mon/Red/Alice"));
    }

    #[test]
    fn test_build_rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        let input = write_schedule(dir.path(), "schedule.txt");

        let err = build(&input, &OrganizeOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid file type"));
    }

    #[test]
    fn test_build_missing_file() {
        let err = build(Path::new("/nonexistent/schedule.csv"), &OrganizeOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
