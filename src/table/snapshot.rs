use serde::{Deserialize, Serialize};

/// Trimmed cell texts of one table row
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Row(pub Vec<String>);

impl Row {
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Row(iter.into_iter().map(Into::into).collect())
    }
}

/// Rows of a table section in document order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TableSnapshot {
    pub rows: Vec<Row>,
}

impl TableSnapshot {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row, useful to check against the header count
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }
}

/// Header cell texts in document order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct HeaderSnapshot {
    pub headers: Vec<String>,
}

impl HeaderSnapshot {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers }
    }

    /// Keep only the final header row. Tables with a grouping "over-header"
    /// row carry the real column names in the last row.
    pub fn from_last_row(rows: &[Row]) -> Self {
        Self {
            headers: rows.last().map(|row| row.0.clone()).unwrap_or_default(),
        }
    }

    /// Flatten every header row into one sequence
    pub fn from_rows(rows: &[Row]) -> Self {
        Self {
            headers: rows.iter().flat_map(|row| row.0.iter().cloned()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Single-key wrapper written to `chart_data.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ExportPayload {
    TableData(TableSnapshot),
    ColumnHeaders(HeaderSnapshot),
}

impl From<TableSnapshot> for ExportPayload {
    fn from(snapshot: TableSnapshot) -> Self {
        ExportPayload::TableData(snapshot)
    }
}

impl From<HeaderSnapshot> for ExportPayload {
    fn from(snapshot: HeaderSnapshot) -> Self {
        ExportPayload::ColumnHeaders(snapshot)
    }
}

/// How a snapshot is laid out in the exported file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    /// `{"tableData": [...]}` / `{"columnHeaders": [...]}`
    #[default]
    Wrapped,
    /// The snapshot itself, as a bare JSON array
    Bare,
}

impl ExportPayload {
    /// JSON value for the requested shape
    pub fn to_value(&self, shape: PayloadShape) -> serde_json::Result<serde_json::Value> {
        match (shape, self) {
            (PayloadShape::Wrapped, payload) => serde_json::to_value(payload),
            (PayloadShape::Bare, ExportPayload::TableData(table)) => serde_json::to_value(table),
            (PayloadShape::Bare, ExportPayload::ColumnHeaders(headers)) => serde_json::to_value(headers),
        }
    }
}
