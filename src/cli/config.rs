//! Configuration management for jfall-rag
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.jfall-rag/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::args::Args;
use crate::errors::{RagError, Result};
use crate::indexing::splitters::SplitterKind;
use crate::logging::LogFormat;
use crate::retrieval::strategies::StrategyKind;

/// Complete configuration for jfall-rag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ollama: OllamaConfig,
    pub data: DataConfig,
    pub indexing: IndexingConfig,
    pub retrieval: RetrievalConfig,
    pub logging: LoggingConfig,
}

/// Ollama connection and model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
    pub chat_model: String,
    pub embedding_model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
}

/// Input data and output file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSONL file with one talk per line
    pub file: PathBuf,
    /// Directory holding content store backups
    pub backup_dir: PathBuf,
    /// Directory for generated judgement lists (system temp dir when unset)
    pub judgement_dir: Option<PathBuf>,
}

/// Chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    pub splitter: SplitterKind,
    pub max_tokens: usize,
    pub show_progress: bool,
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub strategy: StrategyKind,
    pub max_results: usize,
    pub window_size: usize,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 11434,
            chat_model: "llama3.2".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            timeout_secs: 120,
            temperature: 0.0,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("data/jfall/sessions-one.jsonl"),
            backup_dir: PathBuf::from("backups"),
            judgement_dir: None,
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            splitter: SplitterKind::Sentence,
            max_tokens: 100,
            show_progress: true,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::TopN,
            max_results: 2,
            window_size: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RagError::ConfigError(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| RagError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".jfall-rag").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ollama.chat_model.trim().is_empty() {
            return Err(RagError::ConfigError("chat_model must not be empty".to_string()));
        }

        if self.ollama.embedding_model.trim().is_empty() {
            return Err(RagError::ConfigError(
                "embedding_model must not be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.ollama.temperature) {
            return Err(RagError::ConfigError(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        if self.indexing.max_tokens == 0 {
            return Err(RagError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.retrieval.max_results == 0 {
            return Err(RagError::ConfigError(
                "max_results must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply command-line overrides on top of the file values
    pub fn apply_args(&mut self, args: &Args) -> Result<()> {
        if let Some(host) = &args.host {
            self.ollama.host = host.clone();
        }
        if let Some(port) = args.port {
            self.ollama.port = port;
        }
        if let Some(model) = &args.model {
            self.ollama.chat_model = model.clone();
        }
        if let Some(model) = &args.embedding_model {
            self.ollama.embedding_model = model.clone();
        }
        if let Some(file) = &args.data {
            self.data.file = file.clone();
        }
        if let Some(splitter) = args.splitter {
            self.indexing.splitter = splitter;
        }
        if let Some(max_tokens) = args.max_tokens {
            self.indexing.max_tokens = max_tokens;
        }
        if let Some(strategy) = args.strategy {
            self.retrieval.strategy = strategy;
        }
        if let Some(max_results) = args.max_results {
            self.retrieval.max_results = max_results;
        }
        if args.quiet {
            self.indexing.show_progress = false;
        }

        self.validate()
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RagError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RagError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RagError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RagError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Get Ollama base URL
    pub fn ollama_url(&self) -> String {
        format!("http://{}:{}", self.ollama.host, self.ollama.port)
    }

    /// Directory that receives generated judgement lists
    pub fn judgement_dir(&self) -> PathBuf {
        self.data
            .judgement_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ollama.host, "127.0.0.1");
        assert_eq!(config.ollama.port, 11434);
        assert_eq!(config.ollama.chat_model, "llama3.2");
        assert_eq!(config.ollama.embedding_model, "nomic-embed-text");
        assert_eq!(config.retrieval.max_results, 2);
        assert_eq!(config.indexing.splitter, SplitterKind::Sentence);
    }

    #[test]
    fn test_config_validation_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_tokens() {
        let mut config = Config::default();
        config.indexing.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_temperature() {
        let mut config = Config::default();
        config.ollama.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [ollama]
            chat_model = "qwen2.5:7b-instruct"

            [retrieval]
            strategy = "window"
            "#,
        )
        .unwrap();

        assert_eq!(config.ollama.chat_model, "qwen2.5:7b-instruct");
        assert_eq!(config.ollama.port, 11434);
        assert_eq!(config.retrieval.strategy, StrategyKind::Window);
        assert_eq!(config.retrieval.max_results, 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.indexing.splitter = SplitterKind::MaxToken;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.indexing.splitter, SplitterKind::MaxToken);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/jfall-rag.toml")));
        assert!(matches!(result, Err(RagError::ConfigError(_))));
    }

    #[test]
    fn test_apply_args_overrides() {
        let args = Args::parse_from([
            "jfall-rag",
            "--model",
            "mistral",
            "--port",
            "8080",
            "--strategy",
            "document",
            "--max-results",
            "4",
        ]);

        let mut config = Config::default();
        config.apply_args(&args).unwrap();

        assert_eq!(config.ollama.chat_model, "mistral");
        assert_eq!(config.ollama_url(), "http://127.0.0.1:8080");
        assert_eq!(config.retrieval.strategy, StrategyKind::Document);
        assert_eq!(config.retrieval.max_results, 4);
    }

    #[test]
    fn test_apply_args_rejects_zero_results() {
        let args = Args::parse_from(["jfall-rag", "--max-results", "0"]);
        let mut config = Config::default();
        assert!(config.apply_args(&args).is_err());
    }

    #[test]
    fn test_ollama_url() {
        let config = Config::default();
        assert_eq!(config.ollama_url(), "http://127.0.0.1:11434");
    }
}
