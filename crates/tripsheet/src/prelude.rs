//! Prelude module - common imports for tripsheet users
//!
//! ```rust
//! use tripsheet::prelude::*;
//! ```

pub use crate::{
    ActionResult,
    BackingStore,
    CellValue,
    CsvDirStore,
    // Itinerary requests
    EventUpdate,
    FieldValue,
    Identity,
    Itinerary,
    MemoryStore,
    NewExpense,
    PackingToggle,
    // Records
    Record,
    Request,
    Response,
    SheetAccessor,
    TableSchema,
    TripConfig,
    TripData,
};
