use thiserror::Error;

/// Errors raised while capturing a table or writing its JSON export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Failed to parse DOM: {0}")]
    DomParseFailed(String),

    /// The selected element cannot hold table rows
    #[error("<{tag}> is not a table section (expected tbody, thead, tfoot or table)")]
    NotATableSection { tag: String },

    #[error("Selected element has no enclosing <table>")]
    NoEnclosingTable,

    #[error("Table has no <thead> header section")]
    MissingHeaderSection,

    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, ExportError>;
