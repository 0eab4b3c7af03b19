//! pscache — merges pipeline-state cache files.
//!
//! Takes one or more cache files (order-significant) and writes a single
//! cache containing the union of their unique entries, so a fresh
//! install can be warmed with pipelines compiled elsewhere. All the real
//! work lives in `pscache_merge`; this binary is argument parsing,
//! progress printing, and exit codes.

#![warn(missing_docs)]

mod console;

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use pscache_merge::{merge_to_file, MergeReport, NullObserver};

use crate::console::ConsoleObserver;

/// Default output filename when `--output` is omitted.
const DEFAULT_OUTPUT: &str = "output.pscache";

/// Extension a cache file is conventionally expected to carry.
const CACHE_EXTENSION: &str = "pscache";

/// Merge pipeline state cache files.
#[derive(Parser, Debug)]
#[command(name = "pscache", version, about = "Pipeline state cache merger")]
pub struct Cli {
    /// Input cache files, merged in the order given.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output file for the merged cache.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Suppress progress output (errors are still printed).
    #[arg(short, long)]
    pub quiet: bool,

    /// Report format for merge results.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Merge result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable progress on stderr.
    Text,
    /// Machine-readable JSON report on stdout.
    Json,
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Runs the merge and produces the requested report.
fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let progress = !cli.quiet && cli.format == ReportFormat::Text;

    if progress {
        for path in &cli.files {
            if path.extension().and_then(|e| e.to_str()) != Some(CACHE_EXTENSION) {
                eprintln!(
                    "warning: {} does not have a .{CACHE_EXTENSION} extension",
                    path.display()
                );
            }
        }
    }

    let report = if progress {
        let mut observer = ConsoleObserver::new();
        merge_to_file(&cli.files, &cli.output, &mut observer)?
    } else {
        merge_to_file(&cli.files, &cli.output, &mut NullObserver)?
    };

    finish_report(cli, &report)?;
    Ok(0)
}

/// Prints the final summary in the selected format.
fn finish_report(cli: &Cli, report: &MergeReport) -> Result<(), Box<dyn std::error::Error>> {
    match cli.format {
        ReportFormat::Text => {
            if !cli.quiet {
                eprintln!(
                    "   Wrote {} with {} entries",
                    cli.output.display(),
                    report.total_entries
                );
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}
