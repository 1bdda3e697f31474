use crate::catalog;
use crate::error::Result;
use serde::de::Error as _;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    /// Text after the last '.', uppercased. Empty when the name has no '.'.
    pub extension: String,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        Self {
            path: path.into(),
            extension: raw_extension(&name).to_uppercase(),
            name,
            size,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(path, name, metadata.len()))
    }

    /// Extension as typed by the user, sent as the `inputType` field.
    pub fn input_type(&self) -> &str {
        raw_extension(&self.name)
    }

    pub fn mime_type(&self) -> &'static str {
        catalog::mime_type_for(&self.extension)
    }
}

fn raw_extension(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

/// JSON body returned by the conversion endpoint, on success and failure.
/// Fields that are absent or not strings are read as `None`.
#[derive(Debug, Default)]
pub struct ServerReply {
    pub status: Option<String>,
    pub message: Option<String>,
    pub file: Option<String>,
}

impl ServerReply {
    /// Fails only when the body is not a JSON object at all.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        let Value::Object(fields) = value else {
            return Err(serde_json::Error::custom("expected a JSON object"));
        };

        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(String::from);
        Ok(Self {
            status: text("status"),
            message: text("message"),
            file: text("file"),
        })
    }
}
