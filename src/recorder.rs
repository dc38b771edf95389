//! Rotating CSV recorder
//!
//! The [`Recorder`] appends one row per call to a CSV file whose name carries
//! the current calendar period:
//!
//! ```text
//! {dir}/{filename}_{suffix}.csv      suffix: YYYY_MM_DD | YYYY_MM | YYYY
//! ```
//!
//! Files are created lazily, get a header row when they are empty, and are
//! only ever appended to. Each call opens the file, writes, flushes and closes
//! it again; no handle outlives a call.
//!
//! # Concurrency
//!
//! There is no locking. Concurrent calls that target the same file may write
//! duplicate headers or interleave rows. Serialize access externally if more
//! than one writer can hit the same period.
//!
//! # Example
//!
//! ```rust,ignore
//! use csv_recorder::recorder::Recorder;
//! use serde_json::json;
//!
//! let recorder = Recorder::new(
//!     "files/record",
//!     "booking_record",
//!     vec!["id".into(), "request".into(), "response".into()],
//!     "daily",
//! );
//! let path = recorder.record(&json!({"id": "123", "request": "GET /x", "response": "200 OK"}))?;
//! ```

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::RecorderConfig;
use crate::csv_handler::{append_row, project, to_fields};
use crate::error::RecorderError;
use crate::period::{resolve_time_zone, Clock, Granularity, SystemClock};

/// Appends payloads to period-rotated CSV files.
///
/// Construction performs no I/O and no validation. An unsupported record type
/// or an unresolvable time zone is reported by [`Recorder::record`].
#[derive(Clone)]
pub struct Recorder {
    config: RecorderConfig,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Recorder {
    /// Creates a recorder using the system clock and the default time zone.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory the files are written to; created on first record
    /// * `filename` - Base filename, e.g. `booking_record`
    /// * `columns` - Column names in output order
    /// * `record_type` - `daily`, `monthly` or `yearly`
    pub fn new(
        dir: impl Into<PathBuf>,
        filename: impl Into<String>,
        columns: Vec<String>,
        record_type: impl Into<String>,
    ) -> Self {
        Self::from_config(RecorderConfig::new(dir, filename, columns, record_type))
    }

    /// Creates a recorder from a full configuration, using the system clock.
    pub fn from_config(config: RecorderConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Sets the reference time zone. See
    /// [`resolve_time_zone`](crate::period::resolve_time_zone) for the accepted forms.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.config.time_zone = time_zone.into();
        self
    }

    /// Replaces the clock used to determine the current period.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns the recorder's configuration.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Computes the file the next record would go to, without touching the
    /// filesystem.
    ///
    /// # Errors
    ///
    /// [`RecorderError::TimeZone`] or [`RecorderError::UnsupportedRecordType`].
    pub fn target_path(&self) -> Result<PathBuf, RecorderError> {
        let zone = resolve_time_zone(&self.config.time_zone)?;
        let granularity: Granularity = self.config.record_type.parse()?;

        let suffix = zone.suffix_at(self.clock.now(), granularity);
        Ok(self
            .config
            .dir
            .join(format!("{}_{}.csv", self.config.filename, suffix)))
    }

    /// Appends `payload` as one row to the current period's file.
    ///
    /// The payload is projected onto the configured columns by field name.
    /// The directory is created if missing, and a header row is written if
    /// the file is empty. Returns the path that was written.
    ///
    /// # Errors
    ///
    /// - configuration: [`RecorderError::TimeZone`], [`RecorderError::UnsupportedRecordType`]
    /// - payload: [`RecorderError::Serialize`], [`RecorderError::NotAMapping`]
    /// - filesystem: [`RecorderError::CreateDir`] and the errors of [`append_row`]
    ///
    /// Configuration and payload errors leave the filesystem untouched.
    pub fn record<T>(&self, payload: &T) -> Result<PathBuf, RecorderError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.target_path()?;
        let fields = to_fields(payload)?;
        let row = project(&fields, &self.config.columns);

        std::fs::create_dir_all(&self.config.dir).map_err(|source| RecorderError::CreateDir {
            path: self.config.dir.clone(),
            source,
        })?;

        append_row(&path, &self.config.columns, &row)?;
        tracing::debug!(path = %path.display(), "recorded payload");
        Ok(path)
    }

    /// Appends `payload` to an explicit file, projected onto `columns`.
    ///
    /// Unlike [`Recorder::record`] this does not rotate and does not create
    /// the parent directory. `columns` is used as the header if the file is
    /// empty.
    ///
    /// # Errors
    ///
    /// Payload errors as for [`Recorder::record`], plus the errors of [`append_row`].
    pub fn append<T, S>(path: &Path, columns: &[S], payload: &T) -> Result<(), RecorderError>
    where
        T: Serialize + ?Sized,
        S: AsRef<str>,
    {
        let fields = to_fields(payload)?;
        let row = project(&fields, columns);
        let header: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
        append_row(path, &header, &row)
    }
}
