//! # tripsheet
//!
//! A travel itinerary kept in a spreadsheet, treated as a lightly-schemed
//! record store.
//!
//! ## Layers
//!
//! - [`SheetAccessor`] - named tables, full reads as display strings,
//!   single-cell writes and row appends over an explicit [`BackingStore`]
//! - [`mapper`] - rows to [`Record`]s on read, sparse patches and appends on
//!   write, driven by per-table [`TableSchema`]s
//! - [`Itinerary`] - the five trip tables and the requests the trip page
//!   makes, plus the JSON [`Request`] envelope
//!
//! ## Example
//!
//! ```rust
//! use tripsheet::prelude::*;
//!
//! let mut trip = Itinerary::new(MemoryStore::new());
//! trip.init_template().unwrap();
//!
//! let added = trip.add_expense(&NewExpense {
//!     date: "2024/07/01".into(),
//!     desc: "Taxi".into(),
//!     amount: Some(20.0),
//!     ..Default::default()
//! });
//! assert!(added.success);
//!
//! let data = trip.fetch_all();
//! assert_eq!(data.expenses[0].text("desc"), "Taxi");
//! assert_eq!(data.expenses[0].id.as_deref(), Some("1"));
//! ```

pub mod accessor;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod mapper;
pub mod prelude;
pub mod record;
pub mod request;
pub mod schema;
pub mod store;

pub use accessor::{SheetAccessor, TableHandle};
pub use config::{SheetNames, StoreConfig, TripConfig, DEFAULT_CONFIG_FILE};
pub use error::{Error, Result};
pub use itinerary::{
    ActionResult, EventUpdate, Itinerary, NewExpense, PackingToggle, TripData, TripSchemas,
};
pub use mapper::{Appended, Patch, PatchOutcome};
pub use record::{FieldValue, Identity, Record};
pub use request::{Request, Response};
pub use schema::{ColumnIndex, ColumnRef, FieldKind, FieldSpec, TableSchema};
pub use store::{BackingStore, CsvDirStore, MemoryStore};

// Re-export the backing store model
pub use tripsheet_core::{CellAddress, CellRange, CellValue, Workbook, Worksheet};
