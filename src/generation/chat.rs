//! Chat service abstraction over the chat model

use async_trait::async_trait;

use crate::errors::Result;
use crate::ollama::{ChatMessage, OllamaAccess};

/// Default chat model
pub const DEFAULT_CHAT_MODEL: &str = "llama3.2";

/// Sends a conversation to a chat model and returns its reply
#[async_trait]
pub trait ChatService: Send + Sync {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Model answering the requests
    fn model(&self) -> &str;
}

/// Chat service using the Ollama `/api/chat` endpoint
#[derive(Debug, Clone)]
pub struct OllamaChatService {
    access: OllamaAccess,
    model: String,
    temperature: Option<f32>,
}

impl OllamaChatService {
    pub fn new(access: OllamaAccess, model: impl Into<String>) -> Self {
        Self {
            access,
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
impl ChatService for OllamaChatService {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        self.access
            .chat(&self.model, messages, self.temperature)
            .await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
