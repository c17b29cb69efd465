//! table-export command line
//!
//! Reads the table section matching a CSS selector from a browser tab or an
//! HTML file and saves its rows (or its header names) as `chart_data.json`.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use table_export::dom::capture_table_from_html;
use table_export::export::{DEFAULT_FILE_NAME, write_column_list};
use table_export::table::{self, ExportPayload, HeaderSnapshot, PayloadShape};
use table_export::tools::DEFAULT_SELECTOR;
use table_export::{BrowserSession, ConnectionOptions, DomTree, EmitOptions, JsonFileEmitter, LaunchOptions};

#[derive(Parser)]
#[command(name = "table-export")]
#[command(version)]
#[command(about = "Save an HTML table from a browser tab as chart_data.json", long_about = None)]
struct Cli {
    /// Page to open before reading the table
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// DevTools WebSocket URL of an already running browser
    #[arg(long, value_name = "URL", conflicts_with = "html_file")]
    ws_endpoint: Option<String>,

    /// Read a saved HTML document instead of a browser tab
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    html_file: Option<PathBuf>,

    /// CSS selector of the table section to read
    #[arg(long, short = 's', default_value = DEFAULT_SELECTOR)]
    selector: String,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Export the header names of the enclosing table instead of its rows
    #[arg(long)]
    headers: bool,

    /// With --headers, keep only the last header row
    #[arg(long, requires = "headers")]
    last_header_row: bool,

    /// Write the bare array instead of {"tableData": ...} / {"columnHeaders": ...}
    #[arg(long)]
    bare: bool,

    /// With --headers, also write one header per line to this file
    #[arg(long, value_name = "PATH", requires = "headers")]
    columns_file: Option<PathBuf>,

    /// Directory for the JSON file
    #[arg(long, short = 'o', default_value = ".")]
    output_dir: PathBuf,

    /// Name of the JSON file
    #[arg(long, default_value = DEFAULT_FILE_NAME)]
    file_name: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let tree = capture(&cli)?;

    let payload = if cli.headers {
        let headers = if cli.last_header_row {
            HeaderSnapshot::from_last_row(&table::extract_header_rows(&tree)?)
        } else {
            table::extract_headers(&tree)?
        };

        if let Some(path) = &cli.columns_file {
            write_column_list(&headers, path)
                .with_context(|| format!("Failed to write column list {}", path.display()))?;
        }
        ExportPayload::from(headers)
    } else {
        let rows = table::extract_selected_rows(&tree)?;
        if rows.is_empty() {
            log::warn!("'{}' contains no rows", cli.selector);
        }
        ExportPayload::from(rows)
    };

    let shape = if cli.bare { PayloadShape::Bare } else { PayloadShape::Wrapped };
    let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(&cli.output_dir).file_name(&cli.file_name));
    let emitted = emitter.emit_payload(&payload, shape)?;

    println!("{}", emitted.path.display());
    Ok(())
}

fn capture(cli: &Cli) -> Result<DomTree> {
    if let Some(path) = &cli.html_file {
        let html = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok(capture_table_from_html(&html, &cli.selector)?);
    }

    let session = match &cli.ws_endpoint {
        Some(endpoint) => BrowserSession::connect(ConnectionOptions::new(endpoint))?,
        None => {
            if cli.url.is_none() {
                bail!("Nothing to read: pass --url, --ws-endpoint or --html-file");
            }
            let mut options = LaunchOptions::new().headless(!cli.headed);
            if let Some(path) = &cli.chrome_path {
                options = options.chrome_path(path);
            }
            BrowserSession::launch(options)?
        }
    };

    if let Some(url) = &cli.url {
        let result = session.execute_tool("navigate", serde_json::json!({ "url": url }))?;
        if !result.success {
            bail!("Navigation failed: {}", result.error.unwrap_or_default());
        }
    }

    Ok(session.capture_table(&cli.selector)?)
}
