//! Section splitter

use async_trait::async_trait;

use crate::errors::Result;
use crate::indexing::document::{Chunk, InputDocument};
use crate::indexing::splitters::Splitter;

/// Creates one chunk per section, sections being separated by blank lines
#[derive(Debug, Clone, Default)]
pub struct SectionSplitter;

impl SectionSplitter {
    pub fn new() -> Self {
        Self
    }

    pub fn sections(text: &str) -> Vec<String> {
        let mut sections = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    sections.push(current.join("\n"));
                    current.clear();
                }
            } else {
                current.push(line.trim_end());
            }
        }

        if !current.is_empty() {
            sections.push(current.join("\n"));
        }

        sections
    }
}

#[async_trait]
impl Splitter for SectionSplitter {
    async fn split(&self, document: &InputDocument) -> Result<Vec<Chunk>> {
        Ok(Chunk::from_parts(document, Self::sections(&document.text)))
    }

    fn name(&self) -> &'static str {
        "section"
    }
}
