//! HTTP access to a local Ollama server
//!
//! One shared `reqwest` client serves the chat service, the embedder and
//! the bootstrap checks.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, trace};

use crate::errors::{RagError, Result};
use crate::ollama::types::{
    ChatMessage, ChatOptions, ChatRequest, ChatResponse, EmbedRequest, EmbedResponse, TagsResponse,
};

/// Default Ollama API endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Request timeout, generous because local models can be slow to load
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Ollama HTTP client
#[derive(Debug, Clone)]
pub struct OllamaAccess {
    client: Client,
    base_url: String,
}

impl OllamaAccess {
    /// Create client with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_OLLAMA_URL, REQUEST_TIMEOUT)
    }

    /// Create client with custom configuration
    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RagError::HttpError)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a non-streaming chat request and return the assistant's content
    pub async fn chat(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
        temperature: Option<f32>,
    ) -> Result<String> {
        let request = ChatRequest {
            model: model.to_string(),
            messages,
            stream: false,
            options: temperature.map(|temperature| ChatOptions { temperature }),
        };

        debug!(model, messages = request.messages.len(), "Sending chat request");
        let response: ChatResponse = self.post("api/chat", &request).await?;
        trace!(content = %response.message.content, "Chat response received");

        Ok(response.message.content)
    }

    /// Embed a batch of texts, one vector per input in the same order
    pub async fn embed(&self, model: &str, input: &[String]) -> Result<Vec<Vec<f32>>> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbedRequest { model, input };
        debug!(model, inputs = input.len(), "Sending embed request");
        let response: EmbedResponse = self.post("api/embed", &request).await?;

        if response.embeddings.len() != input.len() {
            return Err(RagError::OllamaApiError(format!(
                "Expected {} embeddings, received {}",
                input.len(),
                response.embeddings.len()
            )));
        }

        Ok(response.embeddings)
    }

    /// List installed models
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = self.url("api/tags");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RagError::OllamaApiError(format!("Failed to list models: {}", e)))?;

        if !response.status().is_success() {
            return Err(RagError::OllamaApiError(format!(
                "Failed to retrieve model list: HTTP {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| RagError::OllamaApiError(format!("Failed to parse models: {}", e)))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Check if Ollama is reachable
    pub async fn health_check(&self) -> Result<bool> {
        let url = self.url("api/version");

        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| RagError::OllamaApiError(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RagError::OllamaApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RagError::OllamaApiError(format!("Failed to parse response: {}", e)))
    }
}
