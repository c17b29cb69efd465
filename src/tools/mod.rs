//! Export tools
//!
//! Each tool is a typed operation over a [`BrowserSession`] with
//! `JsonSchema`-derived parameters, so it can be driven from JSON (the CLI,
//! scripts) as well as called directly.
//!
//! | Tool | Purpose |
//! |---|---|
//! | `navigate` | open a URL in the active tab |
//! | `extract_table` | row/cell text of the selected table section |
//! | `extract_headers` | header cell text of the enclosing table |
//! | `save_json` | write a payload to `chart_data.json` |

pub mod extract_headers;
pub mod extract_table;
pub mod navigate;
pub mod save_json;
pub mod utils;

pub use extract_headers::{ExtractHeadersParams, ExtractHeadersTool};
pub use extract_table::{ExtractTableParams, ExtractTableTool};
pub use navigate::{NavigateParams, NavigateTool};
pub use save_json::{SaveJsonParams, SaveJsonTool};

use crate::browser::BrowserSession;
use crate::dom::DomTree;
use crate::error::{ExportError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Selector used when a tool call does not name one
pub const DEFAULT_SELECTOR: &str = "table tbody";

pub(crate) fn default_selector() -> String {
    DEFAULT_SELECTOR.to_string()
}

/// Outcome of a tool execution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self { success: true, data: None, error: None }
    }

    pub fn success_with(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()) }
    }
}

/// State shared by the tools of one run
pub struct ToolContext<'a> {
    pub session: &'a BrowserSession,

    /// Last capture, keyed by the selector it was made for
    capture: Option<(String, DomTree)>,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session, capture: None }
    }

    /// Capture for `selector`, reusing the previous one when the selector matches
    pub fn get_capture(&mut self, selector: &str) -> Result<&DomTree> {
        let stale = !matches!(&self.capture, Some((cached, _)) if cached == selector);
        if stale {
            let tree = self.session.capture_table(selector)?;
            self.capture = Some((selector.to_string(), tree));
        }

        match &self.capture {
            Some((_, tree)) => Ok(tree),
            None => Err(ExportError::DomParseFailed("Capture cache is empty".to_string())),
        }
    }

    /// Forget the cached capture, e.g. after the page changed
    pub fn invalidate_capture(&mut self) {
        self.capture = None;
    }
}

/// A typed export operation
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_default()
    }

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;

    /// Deserialize `params` and run the tool
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed = serde_json::from_value(params)
            .map_err(|e| ExportError::InvalidParams(format!("{}: {}", self.name(), e)))?;
        self.execute_typed(typed, context)
    }
}

/// Object-safe view of a [`Tool`] for the registry
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn execute(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        Tool::execute(self, params, context)
    }
}

/// Tools by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(ExtractTableTool);
        registry.register(ExtractHeadersTool);
        registry.register(SaveJsonTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self.get(name).ok_or_else(|| ExportError::ToolNotFound(name.to_string()))?;
        log::debug!("Executing tool '{}'", name);
        tool.execute(params, context)
    }
}
