//! Bootstrap checks for jfall-rag
//!
//! Verifies that Ollama is running and that the chat and embedding models
//! are pulled before any ingestion starts.

use colored::Colorize;

use crate::errors::Result;
use crate::ollama::OllamaAccess;

/// Ollama detector and bootstrap manager
pub struct Bootstrap {
    access: OllamaAccess,
}

/// Bootstrap check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapStatus {
    Ready,
    OllamaNotRunning,
    ModelNotAvailable(String),
}

impl Bootstrap {
    /// Create a new bootstrap detector
    pub fn new(access: OllamaAccess) -> Self {
        Self { access }
    }

    /// Check if Ollama API is reachable
    pub async fn check_ollama_running(&self) -> Result<bool> {
        self.access.health_check().await
    }

    /// Run complete bootstrap check for every required model
    pub async fn check(&self, models: &[&str]) -> Result<BootstrapStatus> {
        if !self.check_ollama_running().await? {
            return Ok(BootstrapStatus::OllamaNotRunning);
        }

        let installed = self.access.list_models().await?;
        for model in models {
            if !installed.iter().any(|name| model_matches(name, model)) {
                return Ok(BootstrapStatus::ModelNotAvailable(model.to_string()));
            }
        }

        Ok(BootstrapStatus::Ready)
    }

    /// Display installation instructions for Ollama
    pub fn show_ollama_install_instructions(url: &str) {
        eprintln!("\n{} Ollama is not reachable at {}", "✗".red(), url);
        eprintln!("\nOllama runs the language and embedding models for jfall-rag.");
        eprintln!("\n{}", "Installation:".bold());
        eprintln!("   Linux:   curl -fsSL https://ollama.com/install.sh | sh");
        eprintln!("   macOS:   brew install ollama");
        eprintln!("\n{}", "Start Ollama:".bold());
        eprintln!("   ollama serve");
        eprintln!("\nMore info: https://ollama.com/download");
        eprintln!();
    }

    /// Display instructions for pulling a model
    pub fn show_model_pull_instructions(model_tag: &str) {
        eprintln!("\n{} Model '{}' not found!", "✗".red(), model_tag);
        eprintln!("\nTo download this model, run:");
        eprintln!("   ollama pull {}", model_tag.green());
        eprintln!("\nOr choose a different model with --model or --embedding-model");
        eprintln!("Available models at: https://ollama.com/search");
        eprintln!();
    }
}

/// Exit code for setup needed
pub const EXIT_CODE_SETUP_NEEDED: i32 = 2;

/// Ollama reports untagged pulls as `name:latest`
fn model_matches(installed: &str, requested: &str) -> bool {
    installed == requested
        || (!requested.contains(':') && installed == format!("{}:latest", requested))
}
