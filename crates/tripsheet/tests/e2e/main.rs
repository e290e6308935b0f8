//! End-to-end tests for tripsheet.
//!
//! Each test lays out its own workbook directory of CSV sheets in a temp
//! dir, drives the itinerary through a [`CsvDirStore`](tripsheet::CsvDirStore),
//! then reopens the directory and asserts on what was persisted.

mod common;
mod itinerary;
mod mapper;

// Re-export common utilities for submodules
pub use common::*;
