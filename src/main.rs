//! CSV Recorder - append JSON records to period-rotated CSV files
//!
//! Reads one JSON object per line from stdin (or `--input`) and appends each
//! as a row to `{dir}/{filename}_{suffix}.csv`.
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 2 | Command-line usage error (reported by clap) |
//! | 3 | File I/O error |
//! | 4 | Payload error (invalid JSON or non-object line) |
//!
//! Set `RUST_LOG=csv_recorder=debug` to see file creation and header writes.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use csv_recorder::cli::{record_lines, Args};
use csv_recorder::{Recorder, RecorderError};

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for file I/O errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for payload errors; clap already uses 2 for usage errors
const EXIT_PAYLOAD_ERROR: u8 = 4;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Configuration error: {}", e);
            eprintln!("  Hint: Use --help for usage information");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    match run(&args, Recorder::from_config(config)) {
        Ok(count) => {
            eprintln!("Recorded {} rows", count);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

fn run(args: &Args, recorder: Recorder) -> Result<usize, RecorderError> {
    match &args.input {
        Some(path) => {
            tracing::debug!(input = %path.display(), "reading payloads from file");
            record_lines(&recorder, BufReader::new(File::open(path)?))
        }
        None => record_lines(&recorder, io::stdin().lock()),
    }
}

/// Map an error to the appropriate exit code.
fn error_to_exit_code(error: &RecorderError) -> u8 {
    match error {
        RecorderError::TimeZone(_) => EXIT_CONFIG_ERROR,
        RecorderError::UnsupportedRecordType(_) => EXIT_CONFIG_ERROR,
        RecorderError::InvalidArgument(_) => EXIT_CONFIG_ERROR,
        RecorderError::Config { .. } => EXIT_CONFIG_ERROR,
        RecorderError::CreateDir { .. } => EXIT_IO_ERROR,
        RecorderError::OpenFile { .. } => EXIT_IO_ERROR,
        RecorderError::Metadata { .. } => EXIT_IO_ERROR,
        RecorderError::Write { .. } => EXIT_IO_ERROR,
        RecorderError::Flush { .. } => EXIT_IO_ERROR,
        RecorderError::Io(_) => EXIT_IO_ERROR,
        RecorderError::Serialize(_) => EXIT_PAYLOAD_ERROR,
        RecorderError::NotAMapping(_) => EXIT_PAYLOAD_ERROR,
        RecorderError::Payload { .. } => EXIT_PAYLOAD_ERROR,
    }
}
