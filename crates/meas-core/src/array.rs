//! Typed arrays.
//!
//! An [`Array`] is a table whose columns are declared up front. Each row has
//! exactly one cell per column; a cell is either empty or holds a value of
//! its column's kind.
//!
//! On the wire the column schema is a `swe:DataRecord` inside
//! `swe:elementType`, and the rows are `cocop:Row` elements of `cocop:I`
//! cells under `swe:values/cocop:Array`. An empty cell is an empty token.

use std::fmt;

use meas_wire::names::{
    ATTR_CODE, ATTR_NAME, COCOP_ARRAY, COCOP_CELL, COCOP_ROW, SWE_BOOLEAN, SWE_COUNT,
    SWE_DATA_ARRAY, SWE_DATA_RECORD, SWE_DESCRIPTION, SWE_ELEMENT_COUNT, SWE_ELEMENT_TYPE,
    SWE_FIELD, SWE_LABEL, SWE_QUANTITY, SWE_TEXT, SWE_TIME, SWE_UOM, SWE_VALUES,
};
use meas_wire::token::{format_boolean, format_double, format_long, parse_boolean, parse_double, parse_long};
use meas_wire::Element;
use smallvec::SmallVec;

use crate::error::ItemError;
use crate::time::TimeInstant;

/// Name of the `swe:elementType` holding the column schema.
const ELEMENT_TYPE_NAME: &str = "columns";

// ── Columns ─────────────────────────────────────────────────────

/// Value kind of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Truth values.
    Boolean,
    /// Exact integers.
    Count,
    /// Doubles, optionally with a unit of measure.
    Measurement,
    /// Free text.
    Text,
    /// Time instants.
    TimeInstant,
}

impl ColumnKind {
    fn component_name(self) -> &'static str {
        match self {
            Self::Boolean => SWE_BOOLEAN,
            Self::Count => SWE_COUNT,
            Self::Measurement => SWE_QUANTITY,
            Self::Text => SWE_TEXT,
            Self::TimeInstant => SWE_TIME,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Count => "count",
            Self::Measurement => "measurement",
            Self::Text => "text",
            Self::TimeInstant => "time instant",
        };
        f.write_str(name)
    }
}

/// Descriptor of an array column.
///
/// ```
/// use meas_core::{ArrayColumn, ColumnKind};
///
/// let col = ArrayColumn::new("temperature", ColumnKind::Measurement)
///     .with_unit("Cel")
///     .with_label("Temperature");
/// assert_eq!(col.unit(), Some("Cel"));
/// assert!(col.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayColumn {
    name: String,
    kind: ColumnKind,
    unit: Option<String>,
    label: Option<String>,
    description: Option<String>,
    kind_recognized: bool,
}

impl ArrayColumn {
    /// Describe a column. Checked by [`validate`](Self::validate) and
    /// [`Array::new`].
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            unit: None,
            label: None,
            description: None,
            kind_recognized: true,
        }
    }

    /// Set the unit of measure. Only measurement columns may have one; an
    /// empty unit means none.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = non_empty(unit.into());
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.set_label(label);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Unit of measure, if any.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Replace the label. An empty label means none.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = non_empty(label.into());
    }

    /// Description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replace the description. An empty description means none.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = non_empty(description.into());
    }

    /// `false` if the column was decoded from a component kind this crate
    /// does not know; such columns are read as text.
    pub fn is_kind_recognized(&self) -> bool {
        self.kind_recognized
    }

    /// Check the name grammar (non-empty, no colon, no whitespace) and that
    /// only measurement columns carry a unit.
    pub fn validate(&self) -> Result<(), ItemError> {
        if self.name.is_empty() {
            return Err(ItemError::invalid_argument("column name must not be empty"));
        }
        if self.name.contains(':') || self.name.chars().any(char::is_whitespace) {
            return Err(ItemError::invalid_argument(format!(
                "column name \"{}\" must not contain colons or whitespace",
                self.name
            )));
        }
        if self.unit.is_some() && self.kind != ColumnKind::Measurement {
            return Err(ItemError::invalid_argument(format!(
                "column \"{}\": only measurement columns can have a unit, this one is {}",
                self.name, self.kind
            )));
        }
        Ok(())
    }

    fn to_field(&self) -> Element {
        let mut component = Element::new(self.kind.component_name());
        if let Some(label) = &self.label {
            component.push_child(Element::new(SWE_LABEL).with_text(label.as_str()));
        }
        if let Some(description) = &self.description {
            component.push_child(Element::new(SWE_DESCRIPTION).with_text(description.as_str()));
        }
        match self.kind {
            ColumnKind::Measurement => {
                component.push_child(
                    Element::new(SWE_UOM).with_attr(ATTR_CODE, self.unit.as_deref().unwrap_or("")),
                );
            }
            ColumnKind::TimeInstant => {
                component.push_child(Element::new(SWE_UOM));
            }
            _ => {}
        }
        Element::new(SWE_FIELD)
            .with_attr(ATTR_NAME, self.name.as_str())
            .with_child(component)
    }

    fn from_field(field: &Element) -> Result<Self, ItemError> {
        let name = field.require_attr(ATTR_NAME)?;
        let component = field.first_child().ok_or_else(|| {
            ItemError::invalid_message(format!("column \"{name}\" has no component"))
        })?;

        let (kind, kind_recognized) = match component.name() {
            SWE_BOOLEAN => (ColumnKind::Boolean, true),
            SWE_COUNT => (ColumnKind::Count, true),
            SWE_QUANTITY => (ColumnKind::Measurement, true),
            SWE_TEXT => (ColumnKind::Text, true),
            SWE_TIME => (ColumnKind::TimeInstant, true),
            SWE_DATA_RECORD | SWE_DATA_ARRAY => {
                return Err(ItemError::invalid_message(format!(
                    "column \"{name}\": {} is not a valid column type",
                    component.name()
                )));
            }
            other => {
                tracing::debug!(column = name, component = other, "unsupported column kind read as text");
                (ColumnKind::Text, false)
            }
        };

        let mut column = Self::new(name, kind);
        column.kind_recognized = kind_recognized;
        if kind == ColumnKind::Measurement {
            if let Some(code) = component.child(SWE_UOM).and_then(|u| u.attr(ATTR_CODE)) {
                column.unit = non_empty(code.to_string());
            }
        }
        if let Some(label) = component.child_text(SWE_LABEL) {
            column.set_label(label);
        }
        if let Some(description) = component.child_text(SWE_DESCRIPTION) {
            column.set_description(description);
        }
        column.validate()?;
        Ok(column)
    }
}

// ── Cells ───────────────────────────────────────────────────────

/// A non-empty array cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Value of a boolean column.
    Boolean(bool),
    /// Value of a count column.
    Count(i64),
    /// Value of a measurement column.
    Measurement(f64),
    /// Value of a text column.
    Text(String),
    /// Value of a time instant column.
    TimeInstant(TimeInstant),
}

impl Cell {
    /// Column kind this cell belongs to.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Boolean(_) => ColumnKind::Boolean,
            Self::Count(_) => ColumnKind::Count,
            Self::Measurement(_) => ColumnKind::Measurement,
            Self::Text(_) => ColumnKind::Text,
            Self::TimeInstant(_) => ColumnKind::TimeInstant,
        }
    }

    fn to_token(&self) -> String {
        match self {
            Self::Boolean(v) => format_boolean(*v).to_string(),
            Self::Count(v) => format_long(*v),
            Self::Measurement(v) => format_double(*v),
            Self::Text(v) => v.trim().to_string(),
            Self::TimeInstant(v) => v.to_string(),
        }
    }

    fn parse(kind: ColumnKind, raw: &str) -> Result<Option<Self>, ItemError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let parsed = match kind {
            ColumnKind::Boolean => parse_boolean(raw).ok().map(Self::Boolean),
            ColumnKind::Count => parse_long(raw).ok().map(Self::Count),
            ColumnKind::Measurement => parse_double(raw).ok().map(Self::Measurement),
            ColumnKind::Text => Some(Self::Text(raw.trim().to_string())),
            ColumnKind::TimeInstant => TimeInstant::parse(raw).ok().map(Self::TimeInstant),
        };
        parsed.map(Some).ok_or_else(|| {
            ItemError::invalid_message(format!("Failed to parse value in array: \"{raw}\""))
        })
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Self::Count(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Self::Measurement(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<TimeInstant> for Cell {
    fn from(v: TimeInstant) -> Self {
        Self::TimeInstant(v)
    }
}

/// One row of an array; `None` is an empty cell.
pub type Row = SmallVec<[Option<Cell>; 8]>;

// ── Array ───────────────────────────────────────────────────────

/// A table of typed cells.
///
/// ```
/// use meas_core::{Array, ArrayColumn, Cell, ColumnKind};
///
/// let mut array = Array::new(vec![
///     ArrayColumn::new("ok", ColumnKind::Boolean),
///     ArrayColumn::new("n", ColumnKind::Count),
/// ])
/// .unwrap();
/// array.add_row([Some(Cell::from(true)), None]).unwrap();
/// assert!(array.add_row([Some(Cell::from(1.5)), None]).is_err());
/// assert_eq!(array.row_count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Array {
    columns: Vec<ArrayColumn>,
    rows: Vec<Row>,
}

impl Array {
    /// Create an empty array with the given columns, validating each one.
    pub fn new(columns: Vec<ArrayColumn>) -> Result<Self, ItemError> {
        for column in &columns {
            column.validate()?;
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Column schema.
    pub fn columns(&self) -> &[ArrayColumn] {
        &self.columns
    }

    /// Mutable column schema, for changing labels and descriptions.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut ArrayColumn> {
        self.columns.get_mut(index)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Row at `index`.
    pub fn row(&self, index: usize) -> Option<&[Option<Cell>]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Cell>]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Append a row.
    ///
    /// Fails with [`ItemError::InvalidArgument`] if the cell count differs
    /// from the column count or a non-empty cell has the wrong kind; the
    /// array is left unchanged in that case. Blank text cells are stored as
    /// empty and text values are trimmed.
    pub fn add_row<I>(&mut self, cells: I) -> Result<(), ItemError>
    where
        I: IntoIterator<Item = Option<Cell>>,
    {
        let row: Row = cells
            .into_iter()
            .map(|cell| match cell {
                Some(Cell::Text(t)) if t.trim().is_empty() => None,
                Some(Cell::Text(t)) => Some(Cell::Text(t.trim().to_string())),
                other => other,
            })
            .collect();

        if row.len() != self.columns.len() {
            return Err(ItemError::invalid_argument(format!(
                "row has {} cells but the array has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        for (cell, column) in row.iter().zip(&self.columns) {
            if let Some(cell) = cell {
                if cell.kind() != column.kind {
                    return Err(ItemError::invalid_argument(format!(
                        "column \"{}\" expects {}, got {}",
                        column.name,
                        column.kind,
                        cell.kind()
                    )));
                }
            }
        }
        self.rows.push(row);
        Ok(())
    }

    // ── Wire form ───────────────────────────────────────────────

    /// Encode as `swe:DataArray`.
    pub fn to_wire(&self) -> Element {
        let mut element_type = Element::new(SWE_ELEMENT_TYPE).with_attr(ATTR_NAME, ELEMENT_TYPE_NAME);
        if !self.columns.is_empty() {
            let mut schema = Element::new(SWE_DATA_RECORD);
            for column in &self.columns {
                schema.push_child(column.to_field());
            }
            element_type.push_child(schema);
        }

        let mut rows = Element::new(COCOP_ARRAY);
        for row in &self.rows {
            rows.push_child(row_element(row));
        }

        Element::new(SWE_DATA_ARRAY)
            .with_child(Element::new(SWE_ELEMENT_COUNT))
            .with_child(element_type)
            .with_child(Element::new(SWE_VALUES).with_child(rows))
    }

    /// Decode from `swe:DataArray`.
    pub fn from_wire(el: &Element) -> Result<Self, ItemError> {
        let mut columns = Vec::new();
        if let Some(element_type) = el.child(SWE_ELEMENT_TYPE) {
            if let Some(schema) = element_type.first_child() {
                if schema.name() != SWE_DATA_RECORD {
                    return Err(ItemError::invalid_message(format!(
                        "expected {SWE_DATA_RECORD} nested in {SWE_ELEMENT_TYPE}, got {}",
                        schema.name()
                    )));
                }
                for field in schema.children_named(SWE_FIELD) {
                    columns.push(ArrayColumn::from_field(field).map_err(|e| {
                        let name = field.attr(ATTR_NAME).unwrap_or("?");
                        e.in_context(&format!("failed to read column \"{name}\""))
                    })?);
                }
            }
        }

        let mut rows = Vec::new();
        if let Some(values) = el.descend(&[SWE_VALUES, COCOP_ARRAY]) {
            for (index, row) in values.children_named(COCOP_ROW).enumerate() {
                let tokens: Vec<&Element> = row.children_named(COCOP_CELL).collect();
                if tokens.len() != columns.len() {
                    return Err(ItemError::invalid_message(format!(
                        "Inconsistent cell count in row {index}: expected {}, got {}",
                        columns.len(),
                        tokens.len()
                    )));
                }
                let parsed = tokens
                    .iter()
                    .zip(&columns)
                    .map(|(token, column)| Cell::parse(column.kind, token.text_or_empty()))
                    .collect::<Result<Row, _>>()?;
                rows.push(parsed);
            }
        }

        Ok(Self { columns, rows })
    }
}

fn row_element(row: &[Option<Cell>]) -> Element {
    let mut el = Element::new(COCOP_ROW);
    for cell in row {
        let token = cell.as_ref().map(Cell::to_token).unwrap_or_default();
        el.push_child(Element::new(COCOP_CELL).with_text(token));
    }
    el
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
