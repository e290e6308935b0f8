//! The itinerary service: five tables and the requests a trip page makes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::accessor::SheetAccessor;
use crate::config::SheetNames;
use crate::error::{Error, Result};
use crate::mapper::{self, id_column, Patch};
use crate::record::{FieldValue, Identity, Record};
use crate::schema::{ColumnRef, FieldKind, FieldSpec, TableSchema};
use crate::store::BackingStore;

/// Itinerary events, one row per stop of a day
pub fn events_schema(sheet: &str) -> TableSchema {
    TableSchema::new(
        sheet,
        vec![
            FieldSpec::text("dayIndex", "day_index"),
            FieldSpec::text("date", "date"),
            FieldSpec::text("dateLabel", "date_label"),
            FieldSpec::text("dayTitle", "day_title"),
            FieldSpec::text("seq", "seq").with_kind(FieldKind::Number),
            FieldSpec::text("time", "time"),
            FieldSpec::text("title", "title"),
            FieldSpec::text("place", "place"),
            FieldSpec::text("moveTime", "move_time"),
            FieldSpec::text("note", "note"),
        ],
    )
    .with_id_column(id_column())
}

/// Landmarks are positional: the header row is free text
pub fn landmarks_schema(sheet: &str) -> TableSchema {
    TableSchema::new(
        sheet,
        vec![
            FieldSpec::new("name", ColumnRef::Index(0), FieldKind::Text),
            FieldSpec::new("type", ColumnRef::Index(1), FieldKind::Text),
            FieldSpec::new("lat", ColumnRef::Index(2), FieldKind::Number),
            FieldSpec::new("lng", ColumnRef::Index(3), FieldKind::Number),
            FieldSpec::new("memo", ColumnRef::Index(4), FieldKind::Text),
        ],
    )
}

pub fn flights_schema(sheet: &str) -> TableSchema {
    TableSchema::new(
        sheet,
        vec![
            FieldSpec::text("date", "date"),
            FieldSpec::text("segment", "segment"),
            FieldSpec::text("flightNo", "flight_no"),
            FieldSpec::text("time", "time"),
            FieldSpec::text("note", "note"),
        ],
    )
}

pub fn packing_schema(sheet: &str) -> TableSchema {
    TableSchema::new(
        sheet,
        vec![
            FieldSpec::text("category", "category"),
            FieldSpec::text("item", "item"),
            FieldSpec::text("required", "required").with_kind(FieldKind::Flag),
            FieldSpec::text("packed", "packed").with_kind(FieldKind::Flag),
            FieldSpec::text("memo", "memo"),
        ],
    )
    .with_id_column(id_column())
}

/// Append-only expense ledger
pub fn expenses_schema(sheet: &str) -> TableSchema {
    TableSchema::new(
        sheet,
        vec![
            FieldSpec::text("date", "date"),
            FieldSpec::text("category", "category"),
            FieldSpec::text("desc", "desc"),
            FieldSpec::text("amount", "amount").with_kind(FieldKind::Number),
            FieldSpec::text("currency", "currency"),
            FieldSpec::text("paidBy", "paid_by"),
            FieldSpec::text("memo", "memo"),
        ],
    )
    .with_id_column(id_column())
}

/// Schemas of all five tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSchemas {
    pub events: TableSchema,
    pub landmarks: TableSchema,
    pub flights: TableSchema,
    pub packing: TableSchema,
    pub expenses: TableSchema,
}

impl TripSchemas {
    /// Canonical schemas on the configured sheets
    pub fn new(sheets: &SheetNames) -> Self {
        Self {
            events: events_schema(&sheets.events),
            landmarks: landmarks_schema(&sheets.landmarks),
            flights: flights_schema(&sheets.flights),
            packing: packing_schema(&sheets.packing),
            expenses: expenses_schema(&sheets.expenses),
        }
    }

    /// All schemas in page order
    pub fn all(&self) -> [&TableSchema; 5] {
        [
            &self.events,
            &self.landmarks,
            &self.flights,
            &self.packing,
            &self.expenses,
        ]
    }
}

impl Default for TripSchemas {
    fn default() -> Self {
        Self::new(&SheetNames::default())
    }
}

/// Everything the trip page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripData {
    pub success: bool,
    pub events: Vec<Record>,
    pub landmarks: Vec<Record>,
    pub flights: Vec<Record>,
    pub packing: Vec<Record>,
    pub expenses: Vec<Record>,
}

/// Outcome of a write request.
///
/// Failures are carried in `error`; write requests never raise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 1-based sheet row that was written
    #[serde(rename = "rowIndex", default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    /// Id of the written record, when the table has ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ActionResult {
    /// Successful write at `row`
    pub fn ok(row: u32, id: Option<String>) -> Self {
        Self {
            success: true,
            error: None,
            row: Some(row),
            id,
        }
    }

    /// Failed request
    pub fn failure<E: ToString>(error: E) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            row: None,
            id: None,
        }
    }
}

impl From<Result<ActionResult>> for ActionResult {
    fn from(result: Result<ActionResult>) -> Self {
        result.unwrap_or_else(|e| {
            if e.is_not_found() {
                tracing::info!("request failed: {e}");
            } else {
                tracing::warn!("request failed: {e}");
            }
            ActionResult::failure(e)
        })
    }
}

fn identity(id: &Option<String>, row: Option<u32>) -> Result<Identity> {
    match (id, row) {
        (Some(id), _) if !id.trim().is_empty() => Ok(Identity::Id(id.clone())),
        (_, Some(row)) => Ok(Identity::Row(row)),
        _ => Err(Error::MissingIdentity),
    }
}

/// Edit of one event; only the fields present are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub row_index: Option<u32>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub move_time: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl EventUpdate {
    fn patch(&self) -> Patch {
        Patch::new()
            .set_opt("time", self.time.clone())
            .set_opt("title", self.title.clone())
            .set_opt("place", self.place.clone())
            .set_opt("moveTime", self.move_time.clone())
            .set_opt("note", self.note.clone())
    }
}

/// Tick or untick one packing item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingToggle {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub row_index: Option<u32>,
    #[serde(alias = "packed")]
    pub checked: bool,
}

/// A new expense line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewExpense {
    pub date: String,
    pub category: String,
    pub desc: String,
    pub amount: Option<f64>,
    pub currency: String,
    pub paid_by: String,
    pub memo: String,
}

impl NewExpense {
    fn values(&self) -> IndexMap<String, FieldValue> {
        let mut values = IndexMap::new();
        values.insert("date".into(), FieldValue::from(self.date.as_str()));
        values.insert("category".into(), FieldValue::from(self.category.as_str()));
        values.insert("desc".into(), FieldValue::from(self.desc.as_str()));
        values.insert(
            "amount".into(),
            match self.amount {
                Some(amount) => FieldValue::Number(amount),
                None => FieldValue::from(""),
            },
        );
        values.insert("currency".into(), FieldValue::from(self.currency.as_str()));
        values.insert("paidBy".into(), FieldValue::from(self.paid_by.as_str()));
        values.insert("memo".into(), FieldValue::from(self.memo.as_str()));
        values
    }
}

/// Travel itinerary over one backing store
#[derive(Debug)]
pub struct Itinerary<S> {
    accessor: SheetAccessor<S>,
    schemas: TripSchemas,
}

impl<S: BackingStore> Itinerary<S> {
    /// Itinerary with the default sheet names
    pub fn new(store: S) -> Self {
        Self::with_schemas(store, TripSchemas::default())
    }

    /// Itinerary with explicit schemas
    pub fn with_schemas(store: S, schemas: TripSchemas) -> Self {
        Self {
            accessor: SheetAccessor::new(store),
            schemas,
        }
    }

    pub fn schemas(&self) -> &TripSchemas {
        &self.schemas
    }

    pub fn accessor(&self) -> &SheetAccessor<S> {
        &self.accessor
    }

    pub fn into_store(self) -> S {
        self.accessor.into_store()
    }

    /// Create every missing sheet with its template header.
    ///
    /// Existing sheets are left untouched. Returns the names of the sheets
    /// that were created.
    pub fn init_template(&mut self) -> Result<Vec<String>> {
        let mut created = Vec::new();
        for schema in self.schemas.all() {
            if self.accessor.open_table(&schema.sheet).is_ok() {
                continue;
            }
            let header = schema.template_header();
            let header: Vec<&str> = header.iter().map(String::as_str).collect();
            self.accessor.create_table(&schema.sheet, &header)?;
            created.push(schema.sheet.clone());
        }
        Ok(created)
    }

    /// Every table, projected. Never fails; missing tables are empty.
    pub fn fetch_all(&self) -> TripData {
        TripData {
            success: true,
            events: self.events(),
            landmarks: self.landmarks(),
            flights: self.flights(),
            packing: self.packing(),
            expenses: self.expenses(),
        }
    }

    pub fn events(&self) -> Vec<Record> {
        mapper::read_records(&self.accessor, &self.schemas.events)
    }

    pub fn landmarks(&self) -> Vec<Record> {
        mapper::read_records(&self.accessor, &self.schemas.landmarks)
    }

    pub fn flights(&self) -> Vec<Record> {
        mapper::read_records(&self.accessor, &self.schemas.flights)
    }

    pub fn packing(&self) -> Vec<Record> {
        mapper::read_records(&self.accessor, &self.schemas.packing)
    }

    pub fn expenses(&self) -> Vec<Record> {
        mapper::read_records(&self.accessor, &self.schemas.expenses)
    }

    /// Write the present fields of one event
    pub fn update_event(&mut self, update: &EventUpdate) -> ActionResult {
        let result = identity(&update.id, update.row_index).and_then(|identity| {
            let outcome = mapper::apply_patch(
                &mut self.accessor,
                &self.schemas.events,
                &identity,
                &update.patch(),
            )?;
            Ok(ActionResult::ok(outcome.row, update.id.clone()))
        });
        result.into()
    }

    /// Set the packed flag of one packing item
    pub fn toggle_packing(&mut self, toggle: &PackingToggle) -> ActionResult {
        let result = identity(&toggle.id, toggle.row_index).and_then(|identity| {
            let outcome = mapper::apply_patch(
                &mut self.accessor,
                &self.schemas.packing,
                &identity,
                &Patch::new().set("packed", toggle.checked),
            )?;
            Ok(ActionResult::ok(outcome.row, toggle.id.clone()))
        });
        result.into()
    }

    /// Append one expense line
    pub fn add_expense(&mut self, expense: &NewExpense) -> ActionResult {
        let result = mapper::append_record(
            &mut self.accessor,
            &self.schemas.expenses,
            &expense.values(),
        )
        .map(|appended| ActionResult::ok(appended.row, appended.id));
        result.into()
    }
}
