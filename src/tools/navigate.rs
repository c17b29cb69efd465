use crate::error::Result;
use crate::tools::utils::normalize_url;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the navigate tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// Stats page to open: a URL, a bare host, or an absolute path to a saved
    /// HTML file
    pub url: String,

    /// Block until the page has loaded (default: true)
    #[serde(default = "default_wait")]
    pub wait_for_load: bool,
}

fn default_wait() -> bool {
    true
}

impl NavigateParams {
    /// URL handed to the browser
    pub fn target_url(&self) -> String {
        normalize_url(&self.url)
    }
}

/// Opens a stats page in the session's tab and drops any cached table capture
#[derive(Default)]
pub struct NavigateTool;

impl Tool for NavigateTool {
    type Params = NavigateParams;

    fn name(&self) -> &str {
        "navigate"
    }

    fn execute_typed(&self, params: NavigateParams, context: &mut ToolContext) -> Result<ToolResult> {
        let target = params.target_url();

        // A capture from the previous page must never be extracted again
        context.invalidate_capture();
        context.session.navigate(&target)?;

        if params.wait_for_load {
            context.session.wait_for_navigation()?;
        }

        log::info!("Opened {}", target);
        Ok(ToolResult::success_with(serde_json::json!({
            "url": target,
            "local_file": target.starts_with("file://"),
            "waited": params.wait_for_load
        })))
    }
}
