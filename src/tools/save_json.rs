use crate::error::Result;
use crate::export::{DEFAULT_FILE_NAME, EmitOptions, JsonFileEmitter};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the save_json tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SaveJsonParams {
    /// Value to write, e.g. `{"tableData": [...]}` or a bare array of rows
    pub payload: serde_json::Value,

    /// Directory to write into (default: current directory)
    #[serde(default)]
    pub output_dir: Option<String>,

    /// File name (default: "chart_data.json")
    #[serde(default)]
    pub file_name: Option<String>,
}

impl SaveJsonParams {
    fn emit_options(&self) -> EmitOptions {
        let mut options = EmitOptions::new();
        if let Some(dir) = &self.output_dir {
            options = options.output_dir(dir);
        }
        options.file_name(self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME))
    }
}

/// Writes a JSON payload to disk
#[derive(Default)]
pub struct SaveJsonTool;

impl Tool for SaveJsonTool {
    type Params = SaveJsonParams;

    fn name(&self) -> &str {
        "save_json"
    }

    fn execute_typed(&self, params: SaveJsonParams, _context: &mut ToolContext) -> Result<ToolResult> {
        let emitter = JsonFileEmitter::new(params.emit_options());
        let emitted = emitter.emit(&params.payload)?;

        Ok(ToolResult::success_with(serde_json::to_value(&emitted)?))
    }
}
