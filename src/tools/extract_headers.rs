use crate::error::Result;
use crate::table::{self, HeaderSnapshot};
use crate::tools::{Tool, ToolContext, ToolResult, default_selector};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the extract_headers tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractHeadersParams {
    /// CSS selector of any element inside the table (default: "table tbody")
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Keep only the last header row, dropping grouping rows above it
    #[serde(default)]
    pub last_row_only: bool,
}

/// Reads the header cell text of the table enclosing the selection
#[derive(Default)]
pub struct ExtractHeadersTool;

impl Tool for ExtractHeadersTool {
    type Params = ExtractHeadersParams;

    fn name(&self) -> &str {
        "extract_headers"
    }

    fn execute_typed(&self, params: ExtractHeadersParams, context: &mut ToolContext) -> Result<ToolResult> {
        let tree = context.get_capture(&params.selector)?;
        let headers = if params.last_row_only {
            HeaderSnapshot::from_last_row(&table::extract_header_rows(tree)?)
        } else {
            table::extract_headers(tree)?
        };

        log::info!("Extracted {} headers around '{}'", headers.len(), params.selector);
        Ok(ToolResult::success_with(serde_json::json!({
            "columnHeaders": headers,
            "count": headers.len()
        })))
    }
}
