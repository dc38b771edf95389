//! CSV handler module
//!
//! Projects payloads onto a column list and appends the resulting rows to
//! CSV files.

pub mod record;
pub mod writer;

pub use record::{project, render_value, to_fields};
pub use writer::append_row;
