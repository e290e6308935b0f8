//! Records materialized from data rows.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tripsheet_core::CellValue;

use crate::schema::FieldKind;

/// A scalar field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Display text
    Text(String),
    /// Parsed number
    Number(f64),
    /// Parsed flag
    Flag(bool),
}

impl FieldValue {
    /// Interpret a display string according to `kind`.
    ///
    /// Malformed numbers become `0`; anything that does not look like a
    /// ticked box is `false`.
    pub fn parse(kind: FieldKind, display: &str) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(display.to_string()),
            FieldKind::Number => FieldValue::Number(parse_number(display)),
            FieldKind::Flag => FieldValue::Flag(parse_flag(display)),
        }
    }

    /// Zero value of a kind, used when the column is absent
    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Number => FieldValue::Number(0.0),
            FieldKind::Flag => FieldValue::Flag(false),
        }
    }

    /// The display string this value is written back as
    pub fn to_display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => CellValue::Number(*n).to_string(),
            FieldValue::Flag(b) => CellValue::Boolean(*b).to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

fn parse_number(display: &str) -> f64 {
    let cleaned: String = display
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

fn parse_flag(display: &str) -> bool {
    matches!(
        display.trim().to_uppercase().as_str(),
        "TRUE" | "YES" | "Y" | "1" | "V" | "是" | "✓" | "✔"
    )
}

/// The key used to locate a record for an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Value of the table's explicit id column
    Id(String),
    /// 1-based sheet row number from an earlier read; the header is row 1.
    ///
    /// Only valid while no rows were inserted or deleted since that read.
    Row(u32),
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Id(id) => write!(f, "id '{}'", id),
            Identity::Row(row) => write!(f, "row {}", row),
        }
    }
}

/// One data row reified as named fields.
///
/// Created fresh by every read; it goes stale as soon as the sheet changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based sheet row the record was read from
    #[serde(rename = "rowIndex")]
    pub row: u32,
    /// Explicit id, when the table has an id column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Field values in schema order
    #[serde(flatten)]
    pub fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Field value by name
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Field value rendered as text, empty when absent
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(FieldValue::to_display).unwrap_or_default()
    }

    /// The identity an update should use: the explicit id when present,
    /// otherwise the row offset
    pub fn identity(&self) -> Identity {
        match &self.id {
            Some(id) => Identity::Id(id.clone()),
            None => Identity::Row(self.row),
        }
    }
}
