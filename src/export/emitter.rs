use crate::error::{ExportError, Result};
use crate::export::blob::JsonBlob;
use crate::table::{ExportPayload, PayloadShape};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the exported file
pub const DEFAULT_FILE_NAME: &str = "chart_data.json";

/// Where and under which name exports are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Target directory, created on demand
    pub output_dir: PathBuf,

    /// File name inside `output_dir`
    pub file_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method: set the file name
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Path of the export; `file_name` must be a single plain component
    pub fn target_path(&self) -> Result<PathBuf> {
        let mut components = Path::new(&self.file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.output_dir.join(&self.file_name)),
            _ => Err(ExportError::InvalidParams(format!(
                "File name '{}' must not contain a directory",
                self.file_name
            ))),
        }
    }
}

/// A written export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedFile {
    pub path: PathBuf,
    pub mime: &'static str,
    pub bytes: usize,
}

/// Temporary file holding a blob until it is persisted under its final name.
///
/// Dropping an unpersisted `StagedFile` deletes it, so an error anywhere
/// between staging and persisting leaves nothing behind.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
}

impl StagedFile {
    /// Stage `blob` in a fresh temporary file inside `dir`
    pub fn create_in(dir: &Path, blob: &JsonBlob) -> Result<Self> {
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(blob.as_bytes())?;
        file.flush()?;
        log::debug!("Staged {} bytes at {}", blob.len(), file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Move the staged bytes to `target`, replacing any existing file.
    ///
    /// The file keeps the permissions of the one it replaces; a new file is
    /// world-readable (0644 on unix) like a browser download.
    pub fn persist(self, target: &Path) -> Result<PathBuf> {
        match fs::metadata(target) {
            Ok(existing) if existing.is_file() => self.file.as_file().set_permissions(existing.permissions())?,
            _ => set_default_permissions(self.file.as_file())?,
        }
        self.file.persist(target).map_err(|e| ExportError::Io(e.error))?;
        Ok(target.to_path_buf())
    }
}

#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> Result<()> {
    Ok(())
}

/// Writes JSON values to `chart_data.json` (or the configured name)
#[derive(Debug, Clone, Default)]
pub struct JsonFileEmitter {
    options: EmitOptions,
}

impl JsonFileEmitter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Encode `value` and write it to the target path.
    ///
    /// Encoding happens before anything touches the filesystem, so a value
    /// that cannot be serialized fails without creating a file.
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T) -> Result<EmittedFile> {
        let blob = JsonBlob::encode(value)?;
        let target = self.options.target_path()?;

        let dir = &self.options.output_dir;
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }

        let staged = StagedFile::create_in(dir, &blob)?;
        let path = staged.persist(&target)?;

        log::info!("Saved {} ({} bytes, {})", path.display(), blob.len(), blob.mime());
        Ok(EmittedFile {
            path,
            mime: blob.mime(),
            bytes: blob.len(),
        })
    }

    /// Write a snapshot payload in the requested shape
    pub fn emit_payload(&self, payload: &ExportPayload, shape: PayloadShape) -> Result<EmittedFile> {
        let value = payload.to_value(shape)?;
        self.emit(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{HeaderSnapshot, Row, TableSnapshot};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn files_in(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir).unwrap().map(|entry| entry.unwrap().path()).collect()
    }

    #[test]
    fn test_emit_round_trip() {
        let dir = TempDir::new().unwrap();
        let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(dir.path()));

        let payload = json!({"tableData": [["1", "2"]]});
        let emitted = emitter.emit(&payload).unwrap();

        assert_eq!(emitted.path, dir.path().join("chart_data.json"));
        assert_eq!(emitted.mime, "application/json");

        let written = fs::read_to_string(&emitted.path).unwrap();
        assert_eq!(written.len(), emitted.bytes);
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_emit_uses_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(dir.path()));

        let emitted = emitter.emit(&json!({"columnHeaders": ["X"]})).unwrap();
        let written = fs::read_to_string(emitted.path).unwrap();

        assert!(written.contains("\n  \"columnHeaders\": [\n    \"X\"\n  ]"));
    }

    #[test]
    fn test_serialization_failure_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(dir.path()));

        let mut value = HashMap::new();
        value.insert((1, 2), "not a string key");

        let result = emitter.emit(&value);
        assert!(matches!(result, Err(ExportError::Serialization(_))));
        assert!(files_in(dir.path()).is_empty());
    }

    #[test]
    fn test_dropped_staging_file_is_removed() {
        let dir = TempDir::new().unwrap();
        let blob = JsonBlob::encode(&json!([1, 2, 3])).unwrap();

        let staged = StagedFile::create_in(dir.path(), &blob).unwrap();
        let staged_path = staged.path().to_path_buf();
        assert!(staged_path.exists());

        drop(staged);
        assert!(!staged_path.exists());
    }

    #[test]
    fn test_failed_persist_releases_staging_file() {
        let dir = TempDir::new().unwrap();
        // A directory already occupies the target name
        fs::create_dir(dir.path().join("chart_data.json")).unwrap();
        fs::write(dir.path().join("chart_data.json").join("keep"), "x").unwrap();

        let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(dir.path()));
        assert!(emitter.emit(&json!({"tableData": []})).is_err());

        let leftovers: Vec<_> = files_in(dir.path())
            .into_iter()
            .filter(|path| path.file_name().and_then(|n| n.to_str()) != Some("chart_data.json"))
            .collect();
        assert!(leftovers.is_empty(), "staging file left behind: {:?}", leftovers);
    }

    #[test]
    fn test_emit_creates_output_dir_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("exports").join("week1");
        let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(&nested).file_name("qb.json"));

        emitter.emit(&json!(["old"])).unwrap();
        let emitted = emitter.emit(&json!(["new"])).unwrap();

        assert_eq!(emitted.path, nested.join("qb.json"));
        let parsed: Value = serde_json::from_str(&fs::read_to_string(&emitted.path).unwrap()).unwrap();
        assert_eq!(parsed, json!(["new"]));
    }

    #[test]
    fn test_file_name_with_directory_is_rejected() {
        let dir = TempDir::new().unwrap();

        for name in ["sub/x.json", "/abs/x.json", "..", ""] {
            let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(dir.path()).file_name(name));
            let result = emitter.emit(&json!([]));
            assert!(matches!(result, Err(ExportError::InvalidParams(_))), "accepted {:?}", name);
        }
        assert!(files_in(dir.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(dir.path()));

        let emitted = emitter.emit(&json!({"tableData": []})).unwrap();
        let mode = fs::metadata(&emitted.path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("chart_data.json");
        for before in [0o644, 0o664] {
            fs::write(&target, "[]").unwrap();
            fs::set_permissions(&target, fs::Permissions::from_mode(before)).unwrap();

            let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(dir.path()));
            emitter.emit(&json!({"tableData": [["1"]]})).unwrap();

            let after = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
            assert_eq!(after, before);
        }
    }

    #[test]
    fn test_emit_payload_shapes() {
        let dir = TempDir::new().unwrap();
        let emitter = JsonFileEmitter::new(EmitOptions::new().output_dir(dir.path()));
        let table = TableSnapshot::new(vec![Row(vec!["DAL".into(), "31.2".into()])]);
        let payload = ExportPayload::from(table);

        let wrapped = emitter.emit_payload(&payload, PayloadShape::Wrapped).unwrap();
        let parsed: Value = serde_json::from_str(&fs::read_to_string(&wrapped.path).unwrap()).unwrap();
        assert_eq!(parsed, json!({"tableData": [["DAL", "31.2"]]}));

        let bare = emitter.emit_payload(&payload, PayloadShape::Bare).unwrap();
        let parsed: Value = serde_json::from_str(&fs::read_to_string(&bare.path).unwrap()).unwrap();
        assert_eq!(parsed, json!([["DAL", "31.2"]]));

        let headers = ExportPayload::from(HeaderSnapshot::new(vec!["Tm".into()]));
        let emitted = emitter.emit_payload(&headers, PayloadShape::Wrapped).unwrap();
        let parsed: Value = serde_json::from_str(&fs::read_to_string(&emitted.path).unwrap()).unwrap();
        assert_eq!(parsed, json!({"columnHeaders": ["Tm"]}));
    }
}
