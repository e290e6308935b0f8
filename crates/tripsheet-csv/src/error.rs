//! CSV error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A workbook directory that does not exist or is not a directory
    #[error("Not a workbook directory: {0}")]
    NotADirectory(PathBuf),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] tripsheet_core::Error),
}
