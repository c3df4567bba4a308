//! HTML table document rendering.
//!
//! [`TableRenderer`] transforms (columns, rows, formatter) into one complete
//! HTML document string. Columns supply header names, rows are opaque, and
//! the formatter projects each (row, column) pair into a [`CellValue`].
//!
//! Rendering is single-threaded and synchronous; every entity involved is
//! scoped to one `render_table` call. The renderer itself is infallible:
//! formatter failures are reported to the diagnostic sink and degrade to an
//! empty cell, so the returned string is always a structurally complete
//! document.

use crate::cell::{escape_text, CellValue};
use crate::diag::{DiagnosticSink, Severity, TracingSink};
use crate::error::FormatError;

const NEWLINE: &str = "\n";

/// A column descriptor: one axis of the table.
///
/// Identity and ordering come from the column's position in the input slice;
/// the only required capability is a display name.
pub trait Column {
    /// Display name for the column.
    fn name(&self) -> String;
}

/// Capability projecting a (row, column) pair into its display value.
///
/// Must be pure with respect to rendering; it is called exactly once per
/// (row, column) pair in both orientations. A returned error is recoverable:
/// the renderer reports it and emits an empty cell in that position.
pub trait CellFormatter<R, C: Column> {
    /// Produce the display value for one cell.
    fn format(&self, row: &R, column: &C) -> Result<CellValue, FormatError>;
}

/// Adapter turning a closure into a [`CellFormatter`].
pub struct FnFormatter<F>(pub F);

impl<R, C, F> CellFormatter<R, C> for FnFormatter<F>
where
    C: Column,
    F: Fn(&R, &C) -> Result<CellValue, FormatError>,
{
    fn format(&self, row: &R, column: &C) -> Result<CellValue, FormatError> {
        (self.0)(row, column)
    }
}

/// Tag wrapped around each cell of an emitted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellTag {
    Header,
    Data,
}

impl CellTag {
    fn as_str(self) -> &'static str {
        match self {
            CellTag::Header => "th",
            CellTag::Data => "td",
        }
    }
}

/// Append-only fragment buffer owned by a single render call, joined once at
/// the end.
#[derive(Debug, Default)]
struct RenderBuffer {
    fragments: Vec<String>,
}

impl RenderBuffer {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    fn finish(self) -> String {
        self.fragments.concat()
    }
}

/// Renders (columns, rows, formatter) into a complete HTML document string.
///
/// Orientation, title, and diagnostic sink are fixed at construction via the
/// builder methods; `render_table` may then be called any number of times.
///
/// In normal orientation the output is one `<th>` header row followed by one
/// `<tr>` of `<td>` cells per input row. In transposed orientation the axes
/// swap: one `<tr>` per column, whose first cell is the column name followed
/// by that column's value for each row, all tagged `<td>`.
#[derive(Debug, Clone)]
pub struct TableRenderer<S = TracingSink> {
    transposed: bool,
    title: String,
    sink: S,
}

impl TableRenderer<TracingSink> {
    /// Create a renderer in normal orientation with an empty title,
    /// reporting diagnostics through `tracing`.
    pub fn new() -> Self {
        Self {
            transposed: false,
            title: String::new(),
            sink: TracingSink,
        }
    }
}

impl Default for TableRenderer<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> TableRenderer<S> {
    /// Builder: set the orientation. `true` swaps axes.
    pub fn transposed(mut self, transposed: bool) -> Self {
        self.transposed = transposed;
        self
    }

    /// Builder: set the document title (escaped on emission).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: replace the diagnostic sink.
    pub fn with_sink<T: DiagnosticSink>(self, sink: T) -> TableRenderer<T> {
        TableRenderer {
            transposed: self.transposed,
            title: self.title,
            sink,
        }
    }

    /// Render the dataset into a self-contained HTML document string.
    ///
    /// Empty `columns` and `rows` are valid and produce a document with an
    /// empty header row and/or no body rows. This call never fails: identical
    /// inputs yield byte-identical output, and formatter errors degrade to
    /// empty cells with one diagnostic report each.
    pub fn render_table<C, R, F>(&self, columns: &[C], rows: &[R], formatter: &F) -> String
    where
        C: Column,
        F: CellFormatter<R, C>,
    {
        let mut out = RenderBuffer::new();
        self.emit_prologue(&mut out);
        if self.transposed {
            self.emit_transposed(&mut out, columns, rows, formatter);
        } else {
            self.emit_grid(&mut out, columns, rows, formatter);
        }
        self.emit_epilogue(&mut out);
        out.finish()
    }

    /// Doctype through the opening `<table>` tag.
    fn emit_prologue(&self, out: &mut RenderBuffer) {
        out.push("<!DOCTYPE html>");
        out.push(NEWLINE);
        out.push("<html lang=\"en\">");
        out.push(NEWLINE);
        out.push("<head>");
        out.push(NEWLINE);
        out.push(format!("<title>{}</title>", escape_text(&self.title)));
        out.push(NEWLINE);
        out.push("<meta charset=\"UTF-8\">");
        out.push(NEWLINE);
        out.push("<style>");
        out.push(NEWLINE);
        out.push("table { border-collapse: collapse; }");
        out.push(NEWLINE);
        out.push("th, td { border: 1px solid black; }");
        out.push(NEWLINE);
        out.push("</style>");
        out.push(NEWLINE);
        out.push("</head>");
        out.push(NEWLINE);
        out.push("<body>");
        out.push(NEWLINE);
        out.push("<table>");
        out.push(NEWLINE);
    }

    /// Closing `</table>` through `</html>`. Always reached, so the document
    /// is complete even when every cell failed.
    fn emit_epilogue(&self, out: &mut RenderBuffer) {
        out.push("</table>");
        out.push(NEWLINE);
        out.push("</body>");
        out.push(NEWLINE);
        out.push("</html>");
        out.push(NEWLINE);
    }

    /// Normal orientation: header row of column names, then one body row per
    /// input row in column order.
    fn emit_grid<C, R, F>(&self, out: &mut RenderBuffer, columns: &[C], rows: &[R], formatter: &F)
    where
        C: Column,
        F: CellFormatter<R, C>,
    {
        let header: Vec<CellValue> = columns
            .iter()
            .map(|column| CellValue::classify(column.name()))
            .collect();
        self.emit_row(out, &header, CellTag::Header);

        for (row_idx, row) in rows.iter().enumerate() {
            let cells: Vec<CellValue> = columns
                .iter()
                .enumerate()
                .map(|(col_idx, column)| self.resolve_cell(formatter, row, column, row_idx, col_idx))
                .collect();
            self.emit_row(out, &cells, CellTag::Data);
        }
    }

    /// Transposed orientation: one row per column, the column name in the
    /// first cell. Formatter call order stays row-major.
    fn emit_transposed<C, R, F>(
        &self,
        out: &mut RenderBuffer,
        columns: &[C],
        rows: &[R],
        formatter: &F,
    ) where
        C: Column,
        F: CellFormatter<R, C>,
    {
        let mut lanes: Vec<Vec<CellValue>> = columns
            .iter()
            .map(|column| vec![CellValue::classify(column.name())])
            .collect();

        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, column) in columns.iter().enumerate() {
                lanes[col_idx].push(self.resolve_cell(formatter, row, column, row_idx, col_idx));
            }
        }

        for lane in &lanes {
            self.emit_row(out, lane, CellTag::Data);
        }
    }

    /// Project one cell, isolating formatter failures: report and fall back
    /// to an empty cell so row shapes stay intact.
    fn resolve_cell<C, R, F>(
        &self,
        formatter: &F,
        row: &R,
        column: &C,
        row_idx: usize,
        col_idx: usize,
    ) -> CellValue
    where
        C: Column,
        F: CellFormatter<R, C>,
    {
        match formatter.format(row, column) {
            Ok(value) => value,
            Err(err) => {
                self.sink.report(
                    Severity::Error,
                    &format!(
                        "formatter failed at row {}, column {} ('{}'): {}",
                        row_idx,
                        col_idx,
                        column.name(),
                        err
                    ),
                );
                CellValue::plain("")
            }
        }
    }

    /// Row emission primitive: `<tr>`, one tag-wrapped cell per value,
    /// `</tr>`, trailing newline. Orientation-agnostic.
    fn emit_row(&self, out: &mut RenderBuffer, cells: &[CellValue], tag: CellTag) {
        let tag = tag.as_str();
        out.push("<tr>");
        for cell in cells {
            out.push(format!("<{}>", tag));
            out.push(cell.to_html());
            out.push(format!("</{}>", tag));
        }
        out.push("</tr>");
        out.push(NEWLINE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::CaptureSink;
    use std::cell::Cell;

    struct Header(&'static str);

    impl Column for Header {
        fn name(&self) -> String {
            self.0.to_string()
        }
    }

    struct Rec {
        data: &'static str,
    }

    struct JoinFormatter;

    impl CellFormatter<Rec, Header> for JoinFormatter {
        fn format(&self, row: &Rec, column: &Header) -> Result<CellValue, FormatError> {
            Ok(CellValue::plain(format!("{}-{}", row.data, column.name())))
        }
    }

    struct FailingFormatter;

    impl CellFormatter<Rec, Header> for FailingFormatter {
        fn format(&self, _row: &Rec, _column: &Header) -> Result<CellValue, FormatError> {
            Err(FormatError::new("boom"))
        }
    }

    struct CountingFormatter {
        calls: Cell<usize>,
    }

    impl CellFormatter<Rec, Header> for CountingFormatter {
        fn format(&self, _row: &Rec, _column: &Header) -> Result<CellValue, FormatError> {
            self.calls.set(self.calls.get() + 1);
            Ok(CellValue::plain("x"))
        }
    }

    fn columns() -> Vec<Header> {
        vec![Header("Column1"), Header("Column2")]
    }

    fn rows() -> Vec<Rec> {
        vec![Rec { data: "Row1" }, Rec { data: "Row2" }]
    }

    fn count_occurrences(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    /// Pull the inner text of every occurrence of the given cell tag, in
    /// document order.
    fn cell_contents(html: &str, tag: &str) -> Vec<String> {
        let open = format!("<{}>", tag);
        let close = format!("</{}>", tag);
        let mut contents = Vec::new();
        let mut rest = html;
        while let Some(start) = rest.find(&open) {
            let after = &rest[start + open.len()..];
            let end = after.find(&close).expect("unclosed cell tag");
            contents.push(after[..end].to_string());
            rest = &after[end + close.len()..];
        }
        contents
    }

    #[test]
    fn test_determinism() {
        let renderer = TableRenderer::new();
        let first = renderer.render_table(&columns(), &rows(), &JoinFormatter);
        let second = renderer.render_table(&columns(), &rows(), &JoinFormatter);
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_structure() {
        let html = TableRenderer::new().render_table(&columns(), &rows(), &JoinFormatter);

        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.ends_with("</html>\n"));
        let order = [
            "<!DOCTYPE html>",
            "<html lang=\"en\">",
            "<head>",
            "<title>",
            "<meta charset=\"UTF-8\">",
            "<style>",
            "</style>",
            "</head>",
            "<body>",
            "<table>",
            "</table>",
            "</body>",
            "</html>",
        ];
        let mut last = 0;
        for tag in order {
            let pos = html[last..].find(tag).unwrap_or_else(|| panic!("missing {}", tag));
            last += pos;
        }
        assert_eq!(count_occurrences(&html, "<table>"), 1);
        assert_eq!(count_occurrences(&html, "</table>"), 1);
    }

    #[test]
    fn test_empty_inputs_produce_valid_document() {
        let columns: Vec<Header> = Vec::new();
        let rows: Vec<Rec> = Vec::new();
        let html = TableRenderer::new().render_table(&columns, &rows, &JoinFormatter);

        assert!(html.contains("<table>"));
        assert!(html.contains("</table>"));
        // The header row is still emitted, with zero cells.
        assert!(html.contains("<tr></tr>"));
        assert_eq!(count_occurrences(&html, "<tr>"), 1);
        assert_eq!(count_occurrences(&html, "<th>"), 0);
        assert_eq!(count_occurrences(&html, "<td>"), 0);
    }

    #[test]
    fn test_header_count_matches_columns() {
        let html = TableRenderer::new().render_table(&columns(), &rows(), &JoinFormatter);
        assert_eq!(count_occurrences(&html, "<th>"), 2);
    }

    #[test]
    fn test_cell_count_normal_mode() {
        let html = TableRenderer::new().render_table(&columns(), &rows(), &JoinFormatter);
        // One header row plus one body row per input row.
        assert_eq!(count_occurrences(&html, "<tr>"), 3);
        // Each body row has exactly one cell per column.
        assert_eq!(count_occurrences(&html, "<td>"), 4);
    }

    #[test]
    fn test_cell_count_transposed_mode() {
        let html = TableRenderer::new()
            .transposed(true)
            .render_table(&columns(), &rows(), &JoinFormatter);

        // One row per column, each with 1 + rows.len() cells, all data cells.
        assert_eq!(count_occurrences(&html, "<tr>"), 2);
        assert_eq!(count_occurrences(&html, "<td>"), 6);
        assert_eq!(count_occurrences(&html, "<th>"), 0);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let html = TableRenderer::new().render_table(&columns(), &rows(), &JoinFormatter);

        let expected = [
            "<th>Column1</th>",
            "<th>Column2</th>",
            "<td>Row1-Column1</td>",
            "<td>Row2-Column2</td>",
        ];
        let mut last = 0;
        for needle in expected {
            assert_eq!(count_occurrences(&html, needle), 1, "expected once: {}", needle);
            let pos = html[last..].find(needle).expect("out of order");
            last += pos;
        }
    }

    #[test]
    fn test_orientation_equivalence() {
        let renderer = TableRenderer::new();
        let normal = renderer.render_table(&columns(), &rows(), &JoinFormatter);
        let transposed = renderer
            .clone()
            .transposed(true)
            .render_table(&columns(), &rows(), &JoinFormatter);

        let header_names = cell_contents(&normal, "th");
        let first_cells: Vec<String> = cell_contents(&transposed, "td")
            .chunks(1 + rows().len())
            .map(|lane| lane[0].clone())
            .collect();
        assert_eq!(header_names, first_cells);
    }

    #[test]
    fn test_transposed_row_layout() {
        let html = TableRenderer::new()
            .transposed(true)
            .render_table(&columns(), &rows(), &JoinFormatter);

        assert!(html.contains(
            "<tr><td>Column1</td><td>Row1-Column1</td><td>Row2-Column1</td></tr>"
        ));
        assert!(html.contains(
            "<tr><td>Column2</td><td>Row1-Column2</td><td>Row2-Column2</td></tr>"
        ));
    }

    #[test]
    fn test_trusted_cell_emitted_verbatim() {
        let formatter = FnFormatter(|_row: &Rec, _column: &Header| -> Result<CellValue, FormatError> {
            Ok(CellValue::classify("<b>"))
        });
        let html =
            TableRenderer::new().render_table(&columns()[..1], &rows()[..1], &formatter);
        assert!(html.contains("<td><b></td>"));
    }

    #[test]
    fn test_plain_cell_escaped() {
        let formatter = FnFormatter(|_row: &Rec, _column: &Header| -> Result<CellValue, FormatError> {
            Ok(CellValue::classify("5 < 3 & \"quoted\""))
        });
        let html =
            TableRenderer::new().render_table(&columns()[..1], &rows()[..1], &formatter);
        assert!(html.contains("<td>5 &lt; 3 &amp; &quot;quoted&quot;</td>"));
    }

    #[test]
    fn test_line_break_substitution_in_cell() {
        let formatter = FnFormatter(|_row: &Rec, _column: &Header| -> Result<CellValue, FormatError> {
            Ok(CellValue::plain("a\nb"))
        });
        let html =
            TableRenderer::new().render_table(&columns()[..1], &rows()[..1], &formatter);
        assert!(html.contains("<td>a<br/>b</td>"));
    }

    #[test]
    fn test_markup_column_name_emitted_verbatim() {
        let columns = vec![Header("<i>Italic</i>")];
        let html = TableRenderer::new().render_table(&columns, &rows(), &JoinFormatter);
        assert!(html.contains("<th><i>Italic</i></th>"));
    }

    #[test]
    fn test_plain_column_name_escaped() {
        let columns = vec![Header("A & B")];
        let html = TableRenderer::new().render_table(&columns, &rows(), &JoinFormatter);
        assert!(html.contains("<th>A &amp; B</th>"));
    }

    #[test]
    fn test_formatter_failure_degrades_to_empty_cell() {
        let sink = CaptureSink::new();
        let html = TableRenderer::new()
            .with_sink(&sink)
            .render_table(&columns(), &rows(), &FailingFormatter);

        // The document still closes out and every cell position survives.
        assert!(html.ends_with("</html>\n"));
        assert_eq!(count_occurrences(&html, "<td></td>"), 4);
        assert!(html.contains("<table>"));

        // One report per failing cell, at error severity.
        let reports = sink.reports();
        assert_eq!(reports.len(), 4);
        assert!(reports
            .iter()
            .all(|(severity, _)| *severity == Severity::Error));
        assert!(reports[0].1.contains("boom"));
        assert!(reports[0].1.contains("row 0"));
    }

    #[test]
    fn test_formatter_failure_transposed() {
        let sink = CaptureSink::new();
        let html = TableRenderer::new()
            .transposed(true)
            .with_sink(&sink)
            .render_table(&columns(), &rows(), &FailingFormatter);

        // Column names still occupy the first cells; data cells are empty.
        assert!(html.contains("<tr><td>Column1</td><td></td><td></td></tr>"));
        assert_eq!(sink.reports().len(), 4);
    }

    #[test]
    fn test_formatter_called_once_per_pair() {
        let formatter = CountingFormatter {
            calls: Cell::new(0),
        };
        TableRenderer::new().render_table(&columns(), &rows(), &formatter);
        assert_eq!(formatter.calls.get(), 4);

        formatter.calls.set(0);
        TableRenderer::new()
            .transposed(true)
            .render_table(&columns(), &rows(), &formatter);
        assert_eq!(formatter.calls.get(), 4);
    }

    #[test]
    fn test_closure_formatter() {
        let formatter = FnFormatter(|row: &Rec, _column: &Header| -> Result<CellValue, FormatError> {
            Ok(CellValue::plain(row.data))
        });
        let html = TableRenderer::new().render_table(&columns(), &rows(), &formatter);
        assert!(html.contains("<td>Row1</td>"));
    }

    #[test]
    fn test_title_escaped() {
        let html = TableRenderer::new()
            .with_title("Report & Co")
            .render_table(&columns(), &rows(), &JoinFormatter);
        assert!(html.contains("<title>Report &amp; Co</title>"));
    }

    #[test]
    fn test_default_title_empty() {
        let html = TableRenderer::new().render_table(&columns(), &rows(), &JoinFormatter);
        assert!(html.contains("<title></title>"));
    }

    #[test]
    fn test_render_buffer() {
        let mut buffer = RenderBuffer::new();
        buffer.push("<tr>");
        buffer.push(String::from("cell"));
        buffer.push("</tr>");
        assert_eq!(buffer.finish(), "<tr>cell</tr>");
        assert_eq!(RenderBuffer::new().finish(), "");
    }
}
