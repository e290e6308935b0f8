//! Error types for the record store

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the sheet accessor, the record mapper and the itinerary
/// service.
///
/// Read paths swallow these and degrade to empty results; write paths turn
/// them into a failed [`ActionResult`](crate::ActionResult).
#[derive(Debug, Error)]
pub enum Error {
    /// No sheet with this name in the backing store
    #[error("{0} sheet not found")]
    TableNotFound(String),

    /// The identity did not resolve to a row
    #[error("record {identity} not found in {table}")]
    RecordNotFound { table: String, identity: String },

    /// A 1-based cell coordinate outside the table's current extent
    #[error("cell ({row}, {column}) is outside {table} (extent {rows} rows x {columns} columns)")]
    OutOfRange {
        table: String,
        row: u32,
        column: u32,
        rows: u32,
        columns: u32,
    },

    /// A row offset that can never address a data row
    #[error("invalid row index {0}")]
    InvalidRow(u32),

    /// A patch names a field the table schema does not declare
    #[error("unknown field '{field}' for {table}")]
    UnknownField { table: String, field: String },

    /// A field's column is missing from the sheet, so it cannot be written
    #[error("column '{column}' not found in {table}")]
    ColumnNotFound { table: String, column: String },

    /// An id lookup on a table without an id column
    #[error("{0} has no id column")]
    MissingIdColumn(String),

    /// A write request carrying neither an id nor a row index
    #[error("request needs an id or a rowIndex")]
    MissingIdentity,

    /// The largest id in use leaves no room for a fresh one
    #[error("no fresh id left in {0}")]
    IdsExhausted(String),

    /// An append that would write a blank row
    #[error("refusing to append an empty record to {0}")]
    EmptyRecord(String),

    /// Configuration file could not be parsed
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Backing store model error
    #[error(transparent)]
    Core(#[from] tripsheet_core::Error),

    /// CSV persistence error
    #[error(transparent)]
    Csv(#[from] tripsheet_csv::CsvError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the addressed record or table is gone
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TableNotFound(_) | Error::RecordNotFound { .. })
    }
}
