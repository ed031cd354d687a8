//! png2pdf - Convert PNG figures into compact single-page PDFs
//!
//! Performs an in-place conversion of PNG files to PDF. Only 8-bit
//! non-interlaced truecolor, indexed and truecolor+alpha PNGs are
//! supported. Without --apply the run is a dry run: every file is
//! converted and reported, nothing is written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use figpress_core::png_to_pdf;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Convert PNG figures into compact single-page PDFs.
#[derive(Parser, Debug)]
#[command(name = "png2pdf")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Args {
    /// Specific PNG files to convert. If omitted, process every PNG under --root.
    files: Vec<PathBuf>,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Directory to scan when no explicit paths are provided
    #[arg(long, default_value = "figures")]
    root: PathBuf,

    /// Write the resulting PDFs. Without this flag the run is a dry run.
    #[arg(long, action = ArgAction::SetTrue)]
    apply: bool,

    /// Delete the source PNGs after successful conversion (requires --apply)
    #[arg(long = "remove-original", requires = "apply", action = ArgAction::SetTrue)]
    remove_original: bool,
}

/// Size change of one successful conversion.
struct Report {
    original_size: u64,
    converted_size: u64,
}

/// PNG files under `root`, largest first.
fn scan_root(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<(PathBuf, u64)> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext == "png")
        })
        .map(|entry| {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            (entry.into_path(), size)
        })
        .collect();
    files.sort_by(|a, b| b.1.cmp(&a.1));
    files.into_iter().map(|(path, _)| path).collect()
}

/// Convert one PNG, optionally persisting the PDF next to it and deleting
/// the source after a successful write.
fn convert_file(path: &Path, apply: bool, remove_original: bool) -> anyhow::Result<Report> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let pdf = png_to_pdf(&data).with_context(|| format!("failed to convert {}", path.display()))?;

    if apply {
        let pdf_path = path.with_extension("pdf");
        fs::write(&pdf_path, &pdf)
            .with_context(|| format!("failed to write {}", pdf_path.display()))?;
        if remove_original {
            fs::remove_file(path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }

    Ok(Report {
        original_size: data.len() as u64,
        converted_size: pdf.len() as u64,
    })
}

fn kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug {
        "png2pdf=debug,figpress_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let targets = if args.files.is_empty() {
        if !args.root.exists() {
            bail!("directory {} does not exist", args.root.display());
        }
        scan_root(&args.root)
    } else {
        for path in &args.files {
            if !path.exists() {
                bail!("file {} does not exist", path.display());
            }
        }
        args.files.clone()
    };

    if targets.is_empty() {
        println!("No PNG files found to process.");
        return Ok(());
    }

    // Per-file conversions are independent; fan out across worker threads
    // and report in input order.
    let results: Vec<(PathBuf, anyhow::Result<Report>)> = targets
        .par_iter()
        .map(|path| {
            let result = convert_file(path, args.apply, args.remove_original);
            (path.clone(), result)
        })
        .collect();

    let mut failures = 0usize;
    for (path, result) in results {
        match result {
            Ok(report) => {
                let status = if args.apply { "" } else { " (dry run)" };
                println!(
                    "{}: {:.1} KiB -> {:.1} KiB{status}",
                    path.display(),
                    kib(report.original_size),
                    kib(report.converted_size),
                );
            }
            Err(err) => {
                failures += 1;
                eprintln!("Error processing {}: {err:#}", path.display());
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
