//! Content readers turn source files into input documents

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{RagError, Result};
use crate::indexing::document::{InputDocument, Properties};

/// Source of documents for the indexing service
pub trait ContentReader: Send + Sync {
    /// Read every document from the source
    fn read(&self) -> Result<Vec<InputDocument>>;
}

/// Reads JSON-lines files, keeping only a fixed set of properties per line
#[derive(Debug, Clone)]
pub struct JsonlReader {
    properties: Vec<String>,
    path: PathBuf,
}

/// One parsed JSONL line with its 1-based line number
#[derive(Debug, Clone)]
pub struct JsonlLine {
    pub line: usize,
    pub values: Properties,
}

impl JsonlReader {
    pub fn new<S: Into<String>>(properties: impl IntoIterator<Item = S>, path: impl AsRef<Path>) -> Self {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse all non-blank lines
    pub fn lines(&self) -> Result<Vec<JsonlLine>> {
        let contents = fs::read_to_string(&self.path)?;
        let mut lines = Vec::new();

        for (index, raw) in contents.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let value: serde_json::Value =
                serde_json::from_str(raw).map_err(|e| self.parse_error(line, e.to_string()))?;

            let serde_json::Value::Object(object) = value else {
                return Err(self.parse_error(line, "expected a JSON object".to_string()));
            };

            let values = self
                .properties
                .iter()
                .filter_map(|name| object.get(name).map(|v| (name.clone(), v.clone())))
                .collect();

            lines.push(JsonlLine { line, values });
        }

        debug!(path = %self.path.display(), lines = lines.len(), "Read JSONL file");
        Ok(lines)
    }

    fn parse_error(&self, line: usize, message: String) -> RagError {
        RagError::JsonlParse {
            path: self.path.clone(),
            line,
            message,
        }
    }
}
