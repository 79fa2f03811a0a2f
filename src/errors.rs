//! Error types for jfall-rag
//!
//! Every library operation returns [`Result`]; the binary wraps these in
//! `anyhow` at the process boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the RAG pipeline
#[derive(Error, Debug)]
pub enum RagError {
    /// A JSONL line could not be parsed into a record
    #[error("Invalid JSONL record in {path} at line {line}: {message}")]
    JsonlParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A required record field is absent or not a string
    #[error("Missing required field '{field}' at line {line}")]
    MissingField { field: String, line: usize },

    /// Ollama API errors
    #[error("Ollama API error: {0}")]
    OllamaApiError(String),

    /// The language model answered with something we cannot interpret
    #[error("Invalid model response: {0}")]
    InvalidModelResponse(String),

    /// Backup metadata does not match the running store
    #[error("Backup '{name}' was created with embedder '{found}', but the store uses '{expected}'")]
    BackupMismatch {
        name: String,
        expected: String,
        found: String,
    },

    /// Backup files exist but are inconsistent with each other
    #[error("Backup '{name}' is corrupt: {reason}")]
    CorruptBackup { name: String, reason: String },

    /// Operation needs chunks but nothing has been ingested
    #[error("The content store is empty; ingest data or load a backup first")]
    EmptyStore,

    /// Splitter configuration errors
    #[error("Invalid splitter configuration: {0}")]
    InvalidSplitter(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Judgement list read/write errors
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic errors with context
    #[error("RAG error: {0}")]
    Generic(String),
}

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, RagError>;

/// Convert anyhow errors to RagError
impl From<anyhow::Error> for RagError {
    fn from(err: anyhow::Error) -> Self {
        RagError::Generic(err.to_string())
    }
}
