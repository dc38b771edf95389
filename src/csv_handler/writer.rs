use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::OpenOptions;
use std::path::Path;

use crate::error::RecorderError;

/// Appends one row to the CSV file at `path`, writing `header` first when the
/// file is empty.
///
/// The file is opened in append mode and created if absent. Whether a header
/// is needed is decided by the file's size on disk at open time, not by any
/// in-memory state, so restarting the process never duplicates a header. The
/// check is not atomic: two writers racing on a new file can both see an
/// empty file and both write a header.
///
/// # CSV Format
///
/// Fields are comma-separated and quoted only when they contain a comma,
/// a double quote, or a line break; embedded quotes are doubled. Rows end
/// with `\n`.
///
/// # Errors
///
/// Returns [`RecorderError::OpenFile`], [`RecorderError::Metadata`],
/// [`RecorderError::Write`] or [`RecorderError::Flush`], each carrying `path`.
/// A failure after the header was written leaves the header in place.
pub fn append_row<H, R>(path: &Path, header: &[H], row: &[R]) -> Result<(), RecorderError>
where
    H: AsRef<[u8]>,
    R: AsRef<[u8]>,
{
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| RecorderError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;

    let is_empty = file
        .metadata()
        .map_err(|source| RecorderError::Metadata {
            path: path.to_path_buf(),
            source,
        })?
        .len()
        == 0;

    let mut writer = WriterBuilder::new()
        .flexible(true)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    let write_err = |source: csv::Error| RecorderError::Write {
        path: path.to_path_buf(),
        source,
    };

    if is_empty {
        writer.write_record(header).map_err(write_err)?;
        tracing::debug!(path = %path.display(), columns = header.len(), "wrote CSV header");
    }

    writer.write_record(row).map_err(write_err)?;

    writer.flush().map_err(|source| RecorderError::Flush {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::trace!(path = %path.display(), "appended CSV row");
    Ok(())
}
