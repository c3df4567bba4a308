//! Untyped tabular input: a serde model for callers that hold their data as
//! JSON, plus a formatter projecting rows through a column's lookup field.
//!
//! This is the input shape the `htmltab` CLI consumes. Library callers with
//! their own row types implement [`Column`] and [`CellFormatter`] directly
//! instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cell::CellValue;
use crate::error::FormatError;
use crate::renderer::{CellFormatter, Column};

/// A table document: columns, untyped rows, and an optional title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableData {
    /// Document title placed in the rendered `<title>` element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Column descriptors, in display order
    pub columns: Vec<ColumnDef>,
    /// Row objects; each is normally a JSON object keyed by column fields
    #[serde(default)]
    pub rows: Vec<Value>,
}

/// One column of a [`TableData`] document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Display name for the header cell
    pub name: String,
    /// Row field to look up; defaults to the column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Treat this column's values as pre-rendered markup (emitted verbatim)
    #[serde(default)]
    pub markup: bool,
}

impl ColumnDef {
    /// Create a column whose field defaults to its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: None,
            markup: false,
        }
    }

    /// Builder: look up a different row field than the display name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Builder: mark this column's values as pre-rendered markup.
    pub fn with_markup(mut self, markup: bool) -> Self {
        self.markup = markup;
        self
    }

    /// The row field this column reads.
    pub fn field(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.name)
    }
}

impl Column for ColumnDef {
    fn name(&self) -> String {
        self.name.clone()
    }
}

/// Formatter over untyped rows: looks up the column's field in the row
/// object and renders the JSON value as display text.
///
/// Strings render as their text, numbers and booleans via their display
/// form, null as empty text, and nested arrays/objects as compact JSON.
/// A row that is not an object, or lacks the field, is a recoverable
/// formatter error.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldFormatter;

impl CellFormatter<Value, ColumnDef> for FieldFormatter {
    fn format(&self, row: &Value, column: &ColumnDef) -> Result<CellValue, FormatError> {
        let object = row
            .as_object()
            .ok_or_else(|| FormatError::new("row is not a JSON object"))?;
        let value = object.get(column.field()).ok_or_else(|| {
            FormatError::new(format!("row has no field '{}'", column.field()))
        })?;

        let text = match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            nested => nested.to_string(),
        };

        if column.markup {
            Ok(CellValue::trusted(text))
        } else {
            Ok(CellValue::plain(text))
        }
    }
}
