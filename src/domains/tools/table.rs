//! Delimited text tables built from upstream records.
//!
//! A [`Table`] has a fixed, ordered column list. Each column renames one
//! (possibly nested) field of the upstream record. Rendering follows RFC 4180
//! quoting so any cell, including inline JSON, can be parsed back.

use std::borrow::Cow;

use serde_json::Value;

use super::shaping::lookup;

const DELIMITER: char = ',';

/// One output column: the header it is rendered under and the dotted path
/// of the record field it is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub path: &'static str,
}

impl Column {
    pub const fn new(header: &'static str, path: &'static str) -> Self {
        Self { header, path }
    }
}

/// Ordered columns plus the rows collected so far.
#[derive(Debug, Clone)]
pub struct Table {
    columns: &'static [Column],
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: &'static [Column]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table with one row per record.
    pub fn from_records<'a>(
        columns: &'static [Column],
        records: impl IntoIterator<Item = &'a Value>,
    ) -> Self {
        let mut table = Self::new(columns);
        for record in records {
            table.push_record(record);
        }
        table
    }

    /// Append one row, reading each column from `record`.
    ///
    /// Missing or null fields become empty cells.
    pub fn push_record(&mut self, record: &Value) {
        let row = self
            .columns
            .iter()
            .map(|column| render_cell(lookup(record, column.path)))
            .collect();
        self.rows.push(row);
    }

    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.header)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the header line followed by one line per row.
    pub fn render(&self) -> String {
        let header = join_line(self.headers());
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(header);
        lines.extend(
            self.rows
                .iter()
                .map(|row| join_line(row.iter().map(String::as_str))),
        );
        lines.join("\n")
    }
}

/// Text of a single cell.
///
/// Strings are taken verbatim, scalars use their JSON spelling, arrays and
/// objects are embedded as compact JSON.
pub fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested @ (Value::Array(_) | Value::Object(_))) => nested.to_string(),
    }
}

fn join_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells
        .map(escape_cell)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains([DELIMITER, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Parse rendered table text back into lines of cells.
#[cfg(test)]
pub(crate) fn parse(text: &str) -> Vec<Vec<String>> {
    let mut lines = Vec::new();
    let mut line = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (quoted, c) {
            (true, '"') if chars.peek() == Some(&'"') => {
                chars.next();
                cell.push('"');
            }
            (true, '"') => quoted = false,
            (true, _) => cell.push(c),
            (false, '"') => quoted = true,
            (false, DELIMITER) => line.push(std::mem::take(&mut cell)),
            (false, '\n') => {
                line.push(std::mem::take(&mut cell));
                lines.push(std::mem::take(&mut line));
            }
            (false, _) => cell.push(c),
        }
    }
    line.push(cell);
    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COLUMNS: &[Column] = &[
        Column::new("id", "id"),
        Column::new("name", "fullName"),
        Column::new("plan", "plan.name"),
        Column::new("devices", "devices"),
    ];

    fn record() -> Value {
        json!({
            "id": 7,
            "fullName": "Doe, \"JD\" Jane",
            "plan": { "name": "family" },
            "devices": [{ "serial": "SN-1", "model": "X1" }]
        })
    }

    #[test]
    fn test_header_only_when_empty() {
        let table = Table::new(COLUMNS);
        assert!(table.is_empty());
        assert_eq!(table.render(), "id,name,plan,devices");
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let table = Table::from_records(COLUMNS, [&json!({ "id": 1 })]);
        assert_eq!(table.render(), "id,name,plan,devices\n1,,,");
    }

    #[test]
    fn test_quoting() {
        let table = Table::from_records(COLUMNS, [&record()]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("7,\"Doe, \"\"JD\"\" Jane\",family,"));
    }

    #[test]
    fn test_array_cell_is_inline_json() {
        let table = Table::from_records(COLUMNS, [&record()]);
        let cell = &table.rows()[0][3];
        let parsed: Value = serde_json::from_str(cell).unwrap();
        assert_eq!(parsed, json!([{ "serial": "SN-1", "model": "X1" }]));
    }

    #[test]
    fn test_round_trip() {
        let source = record();
        let table = Table::from_records(COLUMNS, [&source]);
        let parsed = parse(&table.render());

        assert_eq!(parsed.len(), 2);
        let headers: Vec<_> = table.headers().collect();
        assert_eq!(parsed[0], headers);
        for (column, cell) in COLUMNS.iter().zip(&parsed[1]) {
            assert_eq!(cell, &render_cell(lookup(&source, column.path)));
        }
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let first = Table::from_records(COLUMNS, [&record(), &json!({ "id": 2 })]).render();
        let second = Table::from_records(COLUMNS, [&record(), &json!({ "id": 2 })]).render();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scalar_cells() {
        assert_eq!(render_cell(Some(&json!(true))), "true");
        assert_eq!(render_cell(Some(&json!(2.5))), "2.5");
        assert_eq!(render_cell(Some(&Value::Null)), "");
        assert_eq!(render_cell(None), "");
    }
}
