//! Indexing: from source files to chunks in the content store
//!
//! - Readers: JSONL and the JFall talk reader
//! - Splitters: sentence, max-token, section, single and semantic
//! - Service: runs reader and splitter and fills the store

pub mod document;
pub mod jfall;
pub mod reader;
pub mod service;
pub mod splitters;

pub use document::{chunk_key, Chunk, InputDocument, Properties};
pub use jfall::JfallContentReader;
pub use reader::{ContentReader, JsonlReader};
pub use service::{IndexingReport, IndexingService};
pub use splitters::{Splitter, SplitterKind};
