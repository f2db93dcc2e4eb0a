//! Error types for data operations.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or slicing the source tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// A source file could not be opened
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A CSV row could not be read or deserialized
    #[error("CSV error in {table} table: {source}")]
    Csv {
        /// Logical table name (desks, risk or pnl)
        table: &'static str,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A date cell did not parse as a day-first or ISO date
    #[error("Invalid date {value:?}: {reason}")]
    DateParse {
        /// Raw cell content
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date of the range
        start: NaiveDate,
        /// End date of the range
        end: NaiveDate,
    },

    /// A picked date lies outside the selectable window
    #[error("Date {date} is outside the selectable window {min} to {max}")]
    OutsideWindow {
        /// Date that was picked
        date: NaiveDate,
        /// First selectable date
        min: NaiveDate,
        /// Last selectable date
        max: NaiveDate,
    },

    /// The date picker yields one or two dates
    #[error("Expected one or two dates, got {0}")]
    DateCount(usize),
}
