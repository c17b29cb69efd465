//! Table snapshots and the extractors that build them

pub mod extract;
pub mod snapshot;

pub use extract::{extract_header_rows, extract_headers, extract_rows, extract_selected_rows};
pub use snapshot::{ExportPayload, HeaderSnapshot, PayloadShape, Row, TableSnapshot};
