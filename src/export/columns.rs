//! Plain-text column lists, one header per line.
//!
//! Plotting scripts pair `chart_data.json` (bare rows) with a column file such
//! as `qb-columns.txt`; lines starting with `[source` are citation leftovers
//! from copy/paste and are ignored on read.

use crate::error::Result;
use crate::table::HeaderSnapshot;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

const SOURCE_MARKER: &str = "[source";

/// Write one header per line, creating parent directories as needed
pub fn write_column_list(headers: &HeaderSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(fs::File::create(path)?);
    for header in &headers.headers {
        writeln!(writer, "{}", header)?;
    }
    writer.flush()?;

    log::info!("Wrote {} column names to {}", headers.len(), path.display());
    Ok(())
}

/// Read a column list written by hand or by [`write_column_list`]
pub fn read_column_list(path: &Path) -> Result<HeaderSnapshot> {
    let content = fs::read_to_string(path)?;
    Ok(parse_column_list(&content))
}

pub fn parse_column_list(content: &str) -> HeaderSnapshot {
    HeaderSnapshot::new(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(SOURCE_MARKER))
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lists").join("qb-columns.txt");
        let headers = HeaderSnapshot::new(vec!["Player Name".into(), "EPA/Play".into(), "Success %".into()]);

        write_column_list(&headers, &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Player Name\nEPA/Play\nSuccess %\n");
        assert_eq!(read_column_list(&path).unwrap(), headers);
    }

    #[test]
    fn test_parse_skips_blank_and_source_lines() {
        let content = "Player Name\n\n[source: 12]\nSeason\n  Team  \n";
        let headers = parse_column_list(content);

        assert_eq!(headers.headers, vec!["Player Name", "Season", "Team"]);
    }
}
