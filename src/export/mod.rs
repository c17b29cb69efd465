//! Writing snapshots to disk
//!
//! - JsonBlob: pretty JSON bytes tagged `application/json`
//! - JsonFileEmitter: stages a blob next to its target and persists it as `chart_data.json`
//! - columns: newline-separated header lists

pub mod blob;
pub mod columns;
pub mod emitter;

pub use blob::{JSON_MIME, JsonBlob};
pub use columns::{read_column_list, write_column_list};
pub use emitter::{DEFAULT_FILE_NAME, EmitOptions, EmittedFile, JsonFileEmitter, StagedFile};
