use crate::error::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// MIME type attached to every JSON export
pub const JSON_MIME: &str = "application/json";

/// Immutable, MIME-tagged bytes staged for writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBlob {
    bytes: Vec<u8>,
}

impl JsonBlob {
    /// Encode `value` as JSON indented by two spaces
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let mut bytes = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"  "));
        value.serialize(&mut serializer)?;
        Ok(Self { bytes })
    }

    pub fn mime(&self) -> &'static str {
        JSON_MIME
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
