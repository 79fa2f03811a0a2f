//! Ollama integration
//!
//! Low-level HTTP access used by the chat service and the embedder.

pub mod client;
pub mod types;

pub use client::{OllamaAccess, DEFAULT_OLLAMA_URL};
pub use types::{ChatMessage, Role};
