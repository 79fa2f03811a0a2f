//! jfall-rag - Retrieval-augmented generation over the JFall talks
//!
//! A command-line demonstration of a complete RAG pipeline running on local
//! Ollama models.
//!
//! # Architecture
//!
//! - **Indexing**: JSONL talks are read, split into chunks and embedded
//! - **Store**: in-memory vector store with disk backups
//! - **Retrieval**: similarity search and context strategies
//! - **Generation**: answers and judgement-list questions from the chat model
//! - **Quality**: retrieval precision and LLM-judged answer quality
//! - **Tracker**: observes one question/answer round trip

pub mod errors;

pub use errors::{RagError, Result};

pub mod cli;
pub mod logging;
pub mod ollama;
pub mod bootstrap;

pub mod indexing;
pub mod embedding;
pub mod store;
pub mod retrieval;
pub mod generation;
pub mod quality;
pub mod tracker;

pub mod app;
pub use app::{AppRag, ObservedAnswer};
