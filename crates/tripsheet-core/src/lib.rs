//! # tripsheet-core
//!
//! The tabular backing store behind tripsheet.
//!
//! This crate provides the spreadsheet-shaped types the record layer sits on:
//! - [`CellValue`] - A cell's value and its display representation
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Workbook`], [`Worksheet`] - Named sheets of sparse cells
//!
//! ## Example
//!
//! ```rust
//! use tripsheet_core::{Workbook, CellValue};
//!
//! let mut workbook = Workbook::empty();
//! workbook.add_worksheet_with_name("events").unwrap();
//! let sheet = workbook.worksheet_by_name_mut("events").unwrap();
//!
//! // Using string addresses
//! sheet.set_cell_value("A1", "id").unwrap();
//! sheet.set_cell_value("B1", "title").unwrap();
//!
//! // Or using row/column indices (0-based)
//! sheet.set_cell_value_at(1, 0, CellValue::Number(1.0)).unwrap();
//! sheet.append_row(vec![CellValue::from(2), CellValue::from("Hike")]).unwrap();
//!
//! assert_eq!(sheet.data_range_values()[2][1].to_string(), "Hike");
//! ```

pub mod cell;
pub mod error;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellRange, CellStorage, CellValue};
pub use error::{Error, Result};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
