//! Reader for the JFall conference talks

use std::path::{Path, PathBuf};

use crate::errors::{RagError, Result};
use crate::indexing::document::{InputDocument, Properties};
use crate::indexing::reader::{ContentReader, JsonlReader};

/// Default data file with a single talk
pub const DEFAULT_SESSIONS_FILE: &str = "data/jfall/sessions-one.jsonl";

/// Fields read from every talk record
pub const TALK_PROPERTIES: [&str; 6] = ["speakers", "title", "description", "room", "time", "tags"];

/// Maps each talk in a JSONL file to one input document
#[derive(Debug, Clone)]
pub struct JfallContentReader {
    file: PathBuf,
}

impl JfallContentReader {
    pub fn new(file: impl AsRef<Path>) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
        }
    }
}

impl Default for JfallContentReader {
    fn default() -> Self {
        Self::new(DEFAULT_SESSIONS_FILE)
    }
}

impl ContentReader for JfallContentReader {
    fn read(&self) -> Result<Vec<InputDocument>> {
        let reader = JsonlReader::new(TALK_PROPERTIES, &self.file);

        reader
            .lines()?
            .into_iter()
            .map(|talk| {
                let title = required_text(&talk.values, "title", talk.line)?;
                let description = required_text(&talk.values, "description", talk.line)?;

                Ok(InputDocument {
                    document_id: document_id_for(&title),
                    text: description,
                    properties: talk.values,
                })
            })
            .collect()
    }
}

/// Document id for a talk: lower-cased title with spaces replaced by hyphens
pub fn document_id_for(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

fn required_text(values: &Properties, field: &str, line: usize) -> Result<String> {
    values
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| RagError::MissingField {
            field: field.to_string(),
            line,
        })
}
