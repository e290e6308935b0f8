//! Field specifications: how each logical field of a table maps to a column.
//!
//! Tables are not uniform. Some resolve fields by header name, some by bare
//! position, and both kinds live side by side behind [`ColumnRef`].

use std::fmt;

use ahash::AHashMap;

/// Where a field's value lives in a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    /// Resolve by looking the name up in the header row
    Name(String),
    /// Fixed 0-based column position
    Index(u16),
}

impl ColumnRef {
    /// Header-name reference
    pub fn name<S: Into<String>>(name: S) -> Self {
        ColumnRef::Name(name.into())
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Name(name) => write!(f, "{}", name),
            ColumnRef::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// How a field's display string is interpreted on read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Kept as displayed
    Text,
    /// Parsed to a number, `0` when malformed or absent
    Number,
    /// Checkbox-like flag, written back as `TRUE`/`FALSE`
    Flag,
}

/// One output field of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name in produced records and in patches
    pub field: String,
    /// Column the field reads from and writes to
    pub column: ColumnRef,
    /// Read interpretation
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Text field resolved by header name
    pub fn text(field: &str, column: &str) -> Self {
        Self::new(field, ColumnRef::name(column), FieldKind::Text)
    }

    /// Field with an explicit column reference and kind
    pub fn new(field: &str, column: ColumnRef, kind: FieldKind) -> Self {
        Self {
            field: field.into(),
            column,
            kind,
        }
    }

    /// Change the kind
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Per-table configuration: sheet name, identity column and fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Sheet holding the table
    pub sheet: String,
    /// Column with explicit unique ids, when the table has one
    pub id_column: Option<ColumnRef>,
    /// Output fields in declaration order
    pub fields: Vec<FieldSpec>,
}

impl TableSchema {
    /// Schema without an id column
    pub fn new<S: Into<String>>(sheet: S, fields: Vec<FieldSpec>) -> Self {
        Self {
            sheet: sheet.into(),
            id_column: None,
            fields,
        }
    }

    /// Declare an explicit id column
    pub fn with_id_column(mut self, column: ColumnRef) -> Self {
        self.id_column = Some(column);
        self
    }

    /// Point the schema at a differently named sheet
    pub fn on_sheet<S: Into<String>>(mut self, sheet: S) -> Self {
        self.sheet = sheet.into();
        self
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.field == name)
    }

    /// Header a freshly created sheet gets.
    ///
    /// Name-based columns use their names; index-based columns use the field
    /// name at their position. The id column comes first.
    pub fn template_header(&self) -> Vec<String> {
        let mut header: Vec<String> = Vec::new();
        if let Some(ColumnRef::Name(id)) = &self.id_column {
            header.push(id.clone());
        }

        for spec in &self.fields {
            match &spec.column {
                ColumnRef::Name(name) => {
                    if !header.contains(name) {
                        header.push(name.clone());
                    }
                }
                ColumnRef::Index(index) => {
                    let index = *index as usize;
                    if header.len() <= index {
                        header.resize(index + 1, String::new());
                    }
                    header[index] = spec.field.clone();
                }
            }
        }
        header
    }
}

/// Header name → 0-based column index, built fresh from one read.
///
/// The first occurrence of a duplicated name wins. Names are compared after
/// trimming surrounding whitespace.
#[derive(Debug)]
pub struct ColumnIndex<'h> {
    header: &'h [String],
    by_name: AHashMap<&'h str, usize>,
}

impl<'h> ColumnIndex<'h> {
    /// Index a header row
    pub fn build(header: &'h [String]) -> Self {
        let mut by_name = AHashMap::with_capacity(header.len());
        for (i, name) in header.iter().enumerate() {
            let name = name.trim();
            if !name.is_empty() {
                by_name.entry(name).or_insert(i);
            }
        }
        Self { header, by_name }
    }

    /// Resolve a column reference to a 0-based index.
    ///
    /// Names missing from the header resolve to `None`. Fixed indices always
    /// resolve; a row too short for them simply reads as empty.
    pub fn resolve(&self, column: &ColumnRef) -> Option<usize> {
        match column {
            ColumnRef::Name(name) => self.by_name.get(name.trim()).copied(),
            ColumnRef::Index(index) => Some(*index as usize),
        }
    }

    /// Number of header cells
    pub fn width(&self) -> usize {
        self.header.len()
    }
}
