// Fintrace - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Reading the input file (encoding-tolerant)
// 4. Running the normalisation engine and emitting the report

use clap::Parser;
use fintrace::core::engine;
use fintrace::util;
use fintrace::util::error::{FintraceError, Result};
use std::fs;
use std::path::PathBuf;

/// Fintrace - Financial-crime audit log analyser.
///
/// Point Fintrace at an audit log export to normalise it into a
/// chronologically ordered forensic event timeline with summary statistics,
/// emitted as a JSON document.
#[derive(Parser, Debug)]
#[command(name = "fintrace", version, about)]
struct Cli {
    /// Audit log file to analyse.
    input: PathBuf,

    /// Write the JSON report to this path instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    tracing::info!(
        version = util::constants::APP_VERSION,
        input = %cli.input.display(),
        "Fintrace starting"
    );

    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "Analysis failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let bytes = fs::read(&cli.input).map_err(|source| FintraceError::Io {
        path: cli.input.clone(),
        operation: "read",
        source,
    })?;

    // The core expects clean text; invalid byte sequences in the source are
    // replaced here, never rejected.
    let raw_logs = String::from_utf8_lossy(&bytes);

    let report = engine::extract_causal_chain(&raw_logs);
    let json = engine::to_json(&report).map_err(FintraceError::from)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &json).map_err(|source| FintraceError::Io {
                path: path.clone(),
                operation: "write",
                source,
            })?;
            tracing::info!(output = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
