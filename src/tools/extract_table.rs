use crate::error::Result;
use crate::table;
use crate::tools::{Tool, ToolContext, ToolResult, default_selector};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the extract_table tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractTableParams {
    /// CSS selector of the table section to read (default: "table tbody")
    #[serde(default = "default_selector")]
    pub selector: String,
}

/// Reads the row/cell text of a table section
#[derive(Default)]
pub struct ExtractTableTool;

impl Tool for ExtractTableTool {
    type Params = ExtractTableParams;

    fn name(&self) -> &str {
        "extract_table"
    }

    fn execute_typed(&self, params: ExtractTableParams, context: &mut ToolContext) -> Result<ToolResult> {
        let tree = context.get_capture(&params.selector)?;
        let snapshot = table::extract_selected_rows(tree)?;

        log::info!("Extracted {} rows from '{}'", snapshot.len(), params.selector);
        Ok(ToolResult::success_with(serde_json::json!({
            "tableData": snapshot,
            "rows": snapshot.len(),
            "columns": snapshot.column_count()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_table_params_default() {
        let params: ExtractTableParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.selector, "table tbody");
    }

    #[test]
    fn test_extract_table_params_selector() {
        let params: ExtractTableParams =
            serde_json::from_value(serde_json::json!({"selector": "#passing tbody"})).unwrap();
        assert_eq!(params.selector, "#passing tbody");
    }

    #[test]
    fn test_extract_table_tool_metadata() {
        let tool = ExtractTableTool;
        assert_eq!(tool.name(), "extract_table");
        assert!(tool.parameters_schema().is_object());
    }
}
