//! Splitters break an input document into chunks
//!
//! Every splitter numbers its chunks from 0 and sets `total_chunks` to the
//! number of chunks produced. Empty text yields no chunks.

pub mod counter;
pub mod max_token;
pub mod section;
pub mod semantic;
pub mod sentence;
pub mod single;

use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::Result;
use crate::generation::ChatService;
use crate::indexing::document::{Chunk, InputDocument};

pub use counter::TokenCounter;
pub use max_token::MaxTokenSplitter;
pub use section::SectionSplitter;
pub use semantic::SemanticSplitter;
pub use sentence::SentenceSplitter;
pub use single::SingleChunkSplitter;

/// Strategy for turning a document into chunks
#[async_trait]
pub trait Splitter: Send + Sync {
    /// Split the document text into numbered chunks
    async fn split(&self, document: &InputDocument) -> Result<Vec<Chunk>>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Selectable splitter implementations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SplitterKind {
    /// One chunk per sentence
    Sentence,
    /// Chunks of at most `max_tokens` estimated tokens
    MaxToken,
    /// One chunk per blank-line separated section
    Section,
    /// The whole text as one chunk
    Single,
    /// Let the chat model decide the chunk boundaries
    Semantic,
}

/// Build the splitter selected in the configuration
pub fn create_splitter(
    kind: SplitterKind,
    max_tokens: usize,
    chat_service: Arc<dyn ChatService>,
) -> Result<Box<dyn Splitter>> {
    let splitter: Box<dyn Splitter> = match kind {
        SplitterKind::Sentence => Box::new(SentenceSplitter::new()),
        SplitterKind::MaxToken => Box::new(MaxTokenSplitter::new(max_tokens)?),
        SplitterKind::Section => Box::new(SectionSplitter::new()),
        SplitterKind::Single => Box::new(SingleChunkSplitter::new()),
        SplitterKind::Semantic => Box::new(SemanticSplitter::new(chat_service)),
    };
    Ok(splitter)
}
