//! # table-export
//!
//! Read an HTML table out of a live Chrome/Chromium tab (via the Chrome
//! DevTools Protocol) or a saved HTML file, and save it as `chart_data.json`.
//!
//! ## Features
//!
//! - **Row extraction**: trimmed cell text of every row of the selected table section
//! - **Header extraction**: header cells of the nearest enclosing table's `<thead>`
//! - **JSON export**: 2-space-indented `application/json` file, written through a
//!   staging file that is removed if anything fails
//! - **Tool system**: the same operations as typed, JSON-driven tools
//!
//! ## Command line
//!
//! ```bash
//! # Rows of the first table body on a page
//! table-export --url https://www.pro-football-reference.com/years/2025/passing.htm \
//!     --selector "#passing tbody"
//!
//! # Header names of the same table, plus a column list for plotting scripts
//! table-export --url ... --selector "#passing tbody" --headers --last-header-row \
//!     --columns-file qb-columns.txt
//!
//! # Attach to your own Chrome started with --remote-debugging-port=9222
//! table-export --ws-endpoint ws://127.0.0.1:9222/devtools/browser/<id> --selector "tbody"
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use table_export::{BrowserSession, ExportPayload, JsonFileEmitter, LaunchOptions};
//!
//! # fn main() -> table_export::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com/stats")?;
//! session.wait_for_navigation()?;
//!
//! let rows = session.extract_table("table tbody")?;
//! println!("Read {} rows", rows.len());
//!
//! let emitted = JsonFileEmitter::default().emit(&ExportPayload::from(rows))?;
//! println!("Saved {}", emitted.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ### Without a browser
//!
//! ```rust
//! use table_export::{dom::DomTree, table};
//!
//! # fn main() -> table_export::Result<()> {
//! let html = "<table><thead><tr><th>X</th></tr></thead><tbody><tr><td> 1 </td></tr></tbody></table>";
//! let tree = DomTree::from_html(html, "tbody")?;
//!
//! assert_eq!(table::extract_selected_rows(&tree)?.rows[0].cells(), ["1"]);
//! assert_eq!(table::extract_headers(&tree)?.headers, ["X"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`dom`]: Capturing the selected table as an owned element tree
//! - [`table`]: Snapshots and the row/header extractors
//! - [`export`]: JSON file emitter and column lists
//! - [`tools`]: JSON-driven tools (navigate, extract_table, extract_headers, save_json)
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod dom;
pub mod error;
pub mod export;
pub mod table;
pub mod tools;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use dom::{DomTree, ElementNode};
pub use error::{ExportError, Result};
pub use export::{EmitOptions, EmittedFile, JsonBlob, JsonFileEmitter};
pub use table::{ExportPayload, HeaderSnapshot, PayloadShape, Row, TableSnapshot};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
