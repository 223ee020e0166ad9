//! Standardize one OCR page
//!
//! Reads a page in the OCR JSON shape, rebuilds its registration table and
//! prints the rows as JSON together with the page score.
//!
//! Usage:
//!   cargo run --bin standardize_page -- page.json
//!   cargo run --bin standardize_page -- page.json --regroup --output clean.json
//!
//! Set `RUST_LOG=debug` to follow column resolution and row segmentation.

use rh_standardize::{clean_table_to_json, Column, Page, Standardizer, TableStatus};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

struct HarnessConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    regroup: bool,
    verbose: bool,
}

impl HarnessConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut regroup = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        output = Some(PathBuf::from(&args[i]));
                    }
                },
                "--regroup" => {
                    regroup = true;
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other => {
                    input = Some(PathBuf::from(other));
                },
            }
            i += 1;
        }

        Self {
            input,
            output,
            regroup,
            verbose,
        }
    }
}

fn run(config: &HarnessConfig, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    let mut page = Page::from_json(&json)?;

    if config.regroup {
        page = page.with_reconstructed_lines();
        if config.verbose {
            eprintln!("Regrouped words into {} lines", page.lines.len());
        }
    }

    let start = Instant::now();
    let standardizer = Standardizer::new();
    let result = standardizer.standardize(&page)?;
    let score = standardizer.score(&page, &result.table);
    let elapsed = start.elapsed();

    if result.status == TableStatus::NoTableFound {
        eprintln!("No registration table found in {}", input.display());
    }

    let output = clean_table_to_json(&result.table)?;
    match &config.output {
        Some(path) => {
            fs::write(path, output.as_bytes())?;
            println!("Wrote {} rows to {}", result.table.len(), path.display());
        },
        None => println!("{}", output),
    }

    if config.verbose {
        eprintln!("Columns resolved: {}/{}", result.columns.resolved_count(), Column::COUNT);
        for column in result.columns.missing() {
            eprintln!("  missing: {}", column.name());
        }
        eprintln!("Rows: {}", result.table.len());
        eprintln!("Time: {:?}", elapsed);
    }
    eprintln!("Score: {:.3}", score);

    Ok(())
}

fn main() {
    env_logger::init();

    let config = HarnessConfig::from_args();
    let Some(input) = config.input.clone() else {
        eprintln!("Usage: standardize_page <page.json> [--regroup] [--output <file>] [--verbose]");
        process::exit(2);
    };

    if let Err(e) = run(&config, &input) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
