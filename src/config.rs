//! Recorder configuration
//!
//! [`RecorderConfig`] holds everything a [`Recorder`](crate::recorder::Recorder)
//! needs. It can be built in code or loaded from a JSON file:
//!
//! ```json
//! {
//!     "dir": "files/record",
//!     "filename": "booking_record",
//!     "columns": ["id", "request", "response"],
//!     "record_type": "daily",
//!     "time_zone": "Asia/Jakarta"
//! }
//! ```
//!
//! `time_zone` is optional and defaults to [`DEFAULT_TIME_ZONE`]. Neither
//! `record_type` nor `time_zone` is checked here; both are resolved on each
//! record call.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::RecorderError;
use crate::period::DEFAULT_TIME_ZONE;

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

/// Configuration of a single recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Directory the rotated files are written to.
    pub dir: PathBuf,
    /// Base filename; the period suffix and `.csv` are appended to it.
    pub filename: String,
    /// Column names, in output order. Also the header row of new files.
    pub columns: Vec<String>,
    /// Rotation granularity: `daily`, `monthly` or `yearly`.
    pub record_type: String,
    /// Reference time zone the current period is computed in.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl RecorderConfig {
    /// Creates a configuration using the default time zone.
    pub fn new(
        dir: impl Into<PathBuf>,
        filename: impl Into<String>,
        columns: Vec<String>,
        record_type: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.into(),
            columns,
            record_type: record_type.into(),
            time_zone: default_time_zone(),
        }
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// - [`RecorderError::Io`] if the file cannot be opened
    /// - [`RecorderError::Config`] if the content is not a valid configuration
    pub fn from_json_file(path: &Path) -> Result<Self, RecorderError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader).map_err(|source| RecorderError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
