//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros and turns
//! the arguments into a [`RecorderConfig`]. Settings come from an optional JSON
//! config file (`--config`); individual flags override the file.
//!
//! Input is read as JSON lines: one JSON object per line, each recorded as one
//! CSV row. Blank lines are skipped.

use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

use crate::config::RecorderConfig;
use crate::error::RecorderError;
use crate::period::DEFAULT_TIME_ZONE;
use crate::recorder::Recorder;

/// Command-line arguments for the CSV recorder.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use csv_recorder::cli::Args;
///
/// let args = Args::parse();
/// let config = args.to_config()?;
/// ```
#[derive(Parser, Debug, Default)]
#[command(name = "csv-recorder")]
#[command(about = "Append JSON records to period-rotated CSV files")]
#[command(version)]
pub struct Args {
    /// JSON file with the recorder configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the CSV files are written to
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Base filename; the period suffix and .csv are appended
    #[arg(long)]
    pub filename: Option<String>,

    /// Comma-separated column names, in output order
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Rotation granularity: daily, monthly or yearly
    #[arg(long)]
    pub record_type: Option<String>,

    /// Reference time zone (e.g. Asia/Jakarta, UTC, +07:00)
    #[arg(long)]
    pub time_zone: Option<String>,

    /// JSON lines file to read payloads from (default: stdin)
    #[arg(long)]
    pub input: Option<PathBuf>,
}

impl Args {
    /// Builds the recorder configuration from the config file and flags.
    ///
    /// # Errors
    ///
    /// - [`RecorderError::InvalidArgument`] if a required setting is missing
    ///   from both the config file and the flags
    /// - the errors of [`RecorderConfig::from_json_file`]
    pub fn to_config(&self) -> Result<RecorderConfig, RecorderError> {
        let base = match &self.config {
            Some(path) => Some(RecorderConfig::from_json_file(path)?),
            None => None,
        };

        let dir = self
            .dir
            .clone()
            .or_else(|| base.as_ref().map(|c| c.dir.clone()))
            .ok_or_else(|| missing("--dir"))?;
        let filename = self
            .filename
            .clone()
            .or_else(|| base.as_ref().map(|c| c.filename.clone()))
            .ok_or_else(|| missing("--filename"))?;
        let columns = self
            .columns
            .clone()
            .or_else(|| base.as_ref().map(|c| c.columns.clone()))
            .ok_or_else(|| missing("--columns"))?;
        let record_type = self
            .record_type
            .clone()
            .or_else(|| base.as_ref().map(|c| c.record_type.clone()))
            .ok_or_else(|| missing("--record-type"))?;
        let time_zone = self
            .time_zone
            .clone()
            .or_else(|| base.as_ref().map(|c| c.time_zone.clone()))
            .unwrap_or_else(|| DEFAULT_TIME_ZONE.to_string());

        if columns.is_empty() {
            return Err(RecorderError::InvalidArgument(
                "at least one column is required".to_string(),
            ));
        }

        Ok(RecorderConfig {
            dir,
            filename,
            columns,
            record_type,
            time_zone,
        })
    }
}

fn missing(flag: &str) -> RecorderError {
    RecorderError::InvalidArgument(format!("{flag} is required unless set in --config"))
}

/// Records every JSON line from `input`, stopping at the first failure.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// - [`RecorderError::Io`] if reading the input fails
/// - [`RecorderError::Payload`] if a line is not valid JSON
/// - any error of [`Recorder::record`]
pub fn record_lines<R: BufRead>(recorder: &Recorder, input: R) -> Result<usize, RecorderError> {
    let mut recorded = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let payload: serde_json::Value =
            serde_json::from_str(trimmed).map_err(|source| RecorderError::Payload {
                line: index + 1,
                source,
            })?;

        recorder.record(&payload)?;
        recorded += 1;
    }

    Ok(recorded)
}
