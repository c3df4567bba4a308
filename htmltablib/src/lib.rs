//! # htmltablib
//!
//! Renders a two-dimensional dataset (columns × rows) into a self-contained
//! HTML document string.
//!
//! ## Overview
//!
//! The core is [`TableRenderer`]: given an ordered slice of column
//! descriptors, an ordered slice of opaque rows, and a formatter that
//! projects each (row, column) pair into a [`CellValue`], it assembles one
//! complete HTML5 document — doctype, minimal inline styling, and exactly
//! one `<table>`.
//!
//! - **Orientation**: normal (one `<th>` header row, one body row per input
//!   row) or transposed (one row per column, the column name in the first
//!   cell, no header tags).
//! - **Cell safety**: the trust decision is explicit. [`CellValue::Plain`]
//!   text is HTML-escaped with line breaks turned into `<br/>`;
//!   [`CellValue::Trusted`] markup is emitted verbatim.
//! - **Resilience**: `render_table` never fails. Formatter errors are
//!   reported to an injected [`DiagnosticSink`] and degrade to empty cells;
//!   the returned string is always a structurally complete document.
//!
//! Callers with untyped data can use the [`TableData`] serde model and
//! [`FieldFormatter`]; the `htmltab` CLI is a thin wrapper over exactly
//! that path.
//!
//! ## Example
//!
//! ```rust
//! use htmltablib::{FieldFormatter, TableData, TableRenderer};
//!
//! let data: TableData = serde_json::from_str(r#"{
//!     "columns": [{ "name": "Name" }, { "name": "Role" }],
//!     "rows": [
//!         { "Name": "Ada", "Role": "Engineer" },
//!         { "Name": "Grace", "Role": "Admiral" }
//!     ]
//! }"#).unwrap();
//!
//! let html = TableRenderer::new().render_table(&data.columns, &data.rows, &FieldFormatter);
//! assert!(html.contains("<th>Name</th>"));
//! assert!(html.contains("<td>Ada</td>"));
//!
//! // Transposed: one row per column, names in the first cell.
//! let html = TableRenderer::new()
//!     .transposed(true)
//!     .render_table(&data.columns, &data.rows, &FieldFormatter);
//! assert!(html.contains("<td>Name</td><td>Ada</td><td>Grace</td>"));
//! ```

pub mod cell;
pub mod diag;
pub mod error;
pub mod renderer;
pub mod table;

pub use cell::CellValue;
pub use diag::{CaptureSink, DiagnosticSink, Severity, TracingSink};
pub use error::FormatError;
pub use renderer::{CellFormatter, Column, FnFormatter, TableRenderer};
pub use table::{ColumnDef, FieldFormatter, TableData};

/// Result type for formatter operations
pub type Result<T> = std::result::Result<T, FormatError>;
