//! CSV Recorder Library
//!
//! Appends structured records to CSV files that rotate daily, monthly or
//! yearly. It includes modules for period computation, payload projection,
//! CSV appending, configuration and the command-line interface.

pub mod cli;
pub mod config;
pub mod csv_handler;
pub mod error;
pub mod period;
pub mod recorder;

pub use config::RecorderConfig;
pub use error::RecorderError;
pub use period::{Clock, FixedClock, Granularity, ReferenceZone, SystemClock};
pub use recorder::Recorder;
