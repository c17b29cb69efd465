use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            dom::{self, DomTree},
            error::{ExportError, Result},
            table::{self, HeaderSnapshot, TableSnapshot},
            tools::{ToolContext, ToolRegistry}};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that manages a Chrome/Chromium instance
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Tool registry for executing export tools
    tool_registry: ToolRegistry,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Some table-heavy sites refuse to render for automation-flagged browsers
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // The default idle timeout of 30 seconds is too short for a page the user is still loading
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| ExportError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| ExportError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::info!("Launched browser ({})", if options.headless { "headless" } else { "headed" });
        Ok(Self { browser, tool_registry: ToolRegistry::with_defaults() })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url.clone(), Duration::from_millis(options.timeout))
            .map_err(|e| ExportError::ConnectionFailed(e.to_string()))?;

        log::info!("Connected to browser at {}", options.ws_url);
        Ok(Self { browser, tool_registry: ToolRegistry::with_defaults() })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| ExportError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // Visible and focused is the tab the user is looking at
        if let Some(tab) = Self::first_matching(&tabs, "document.visibilityState === 'visible' && document.hasFocus()") {
            return Ok(tab);
        }

        if let Some(tab) = Self::first_matching(&tabs, "document.visibilityState === 'visible'") {
            return Ok(tab);
        }

        // Headless tabs may report neither
        tabs.first()
            .cloned()
            .ok_or_else(|| ExportError::TabOperationFailed("No active tab found".to_string()))
    }

    fn first_matching(tabs: &[Arc<Tab>], condition: &str) -> Option<Arc<Tab>> {
        tabs.iter()
            .find(|tab| match tab.evaluate(condition, false) {
                Ok(remote_object) => remote_object.value.and_then(|v| v.as_bool()).unwrap_or(false),
                Err(e) => {
                    log::debug!("Failed to check tab status: {}", e);
                    false
                }
            })
            .cloned()
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL using the active tab
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| ExportError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| ExportError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Capture the table around the element matching `selector` in the active tab
    pub fn capture_table(&self, selector: &str) -> Result<DomTree> {
        dom::capture_table(&self.tab()?, selector)
    }

    /// Rows of the table section matching `selector`
    pub fn extract_table(&self, selector: &str) -> Result<TableSnapshot> {
        table::extract_selected_rows(&self.capture_table(selector)?)
    }

    /// Header cells of the table enclosing the element matching `selector`
    pub fn extract_headers(&self, selector: &str) -> Result<HeaderSnapshot> {
        table::extract_headers(&self.capture_table(selector)?)
    }

    /// Get the tool registry
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Get mutable tool registry
    pub fn tool_registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.tool_registry
    }

    /// Execute a tool by name
    pub fn execute_tool(&self, name: &str, params: serde_json::Value) -> Result<crate::tools::ToolResult> {
        let mut context = ToolContext::new(self);
        self.tool_registry.execute(name, params, &mut context)
    }
}
