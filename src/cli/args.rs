//! Command-line argument parsing for jfall-rag
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::indexing::splitters::SplitterKind;
use crate::retrieval::strategies::StrategyKind;

/// jfall-rag - Retrieval-augmented generation over the JFall talks with Ollama
#[derive(Parser, Debug)]
#[command(name = "jfall-rag")]
#[command(version)]
#[command(about = "Ask questions about the JFall conference talks using local Ollama models", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ollama host
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Ollama port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Ollama chat model used to generate answers and questions
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Ollama embedding model used by the content store
    #[arg(long, global = true)]
    pub embedding_model: Option<String>,

    /// JSONL file with the talks to ingest
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Load the content store from this backup instead of ingesting data
    #[arg(long, global = true)]
    pub backup: Option<String>,

    /// Splitter used to create chunks
    #[arg(long, value_enum, global = true)]
    pub splitter: Option<SplitterKind>,

    /// Token limit for the max-token splitter
    #[arg(long, global = true)]
    pub max_tokens: Option<usize>,

    /// Strategy used to build the context for an answer
    #[arg(long, value_enum, global = true)]
    pub strategy: Option<StrategyKind>,

    /// Number of chunks to retrieve per question
    #[arg(long, global = true)]
    pub max_results: Option<usize>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only warnings and errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand (defaults to the full demo)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Run every step: ingest, retrieve, judge retrieval, answer and observe
    Demo {
        /// Questions to ask (defaults to the two RAG questions)
        #[arg(long = "question")]
        questions: Vec<String>,

        /// Skip generating and running the judgement list
        #[arg(long)]
        skip_judgement: bool,
    },

    /// Log the chunks most related to a question
    Retrieve {
        /// Question to match against the stored chunks
        question: String,
    },

    /// Answer a question with the chat model
    Answer {
        /// Question to answer
        question: String,

        /// Track the pipeline and judge the quality of the answer
        #[arg(long)]
        observed: bool,
    },

    /// Generate or run a judgement list for the retriever
    Judgement {
        #[command(subcommand)]
        action: JudgementAction,
    },

    /// Ingest the data and store a backup of the content store
    Backup {
        /// Name of the backup
        name: String,
    },

    /// List available Ollama models
    Models,

    /// Display current configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

/// Judgement list actions
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum JudgementAction {
    /// Generate a question for every chunk and save them as CSV
    Generate {
        /// File name of the judgement list
        #[arg(default_value = "jfall_questions_answers_sample.csv")]
        file_name: String,
    },

    /// Measure retrieval precision with an existing judgement list
    Run {
        /// Path to the judgement list CSV
        path: PathBuf,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Subcommand to run, the demo when none was given
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Demo {
            questions: Vec::new(),
            skip_judgement: false,
        })
    }
}

impl Verbosity {
    /// Log level that matches the verbosity, `None` keeps the configured level
    pub fn log_level(&self) -> Option<&'static str> {
        match self {
            Verbosity::Quiet => Some("warn"),
            Verbosity::Normal => None,
            Verbosity::Verbose => Some("debug"),
            Verbosity::VeryVerbose => Some("trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_quiet() {
        let args = Args::parse_from(["jfall-rag", "-q"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);
        assert_eq!(args.verbosity().log_level(), Some("warn"));
    }

    #[test]
    fn test_verbosity_normal() {
        let args = Args::parse_from(["jfall-rag"]);
        assert_eq!(args.verbosity(), Verbosity::Normal);
        assert_eq!(args.verbosity().log_level(), None);
    }

    #[test]
    fn test_verbosity_very_verbose() {
        let args = Args::parse_from(["jfall-rag", "-vv"]);
        assert_eq!(args.verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_default_command_is_demo() {
        let args = Args::parse_from(["jfall-rag"]);
        assert_eq!(
            args.command_or_default(),
            Commands::Demo {
                questions: Vec::new(),
                skip_judgement: false
            }
        );
    }

    #[test]
    fn test_answer_observed() {
        let args = Args::parse_from(["jfall-rag", "answer", "What is RAG?", "--observed"]);
        assert_eq!(
            args.command,
            Some(Commands::Answer {
                question: "What is RAG?".to_string(),
                observed: true
            })
        );
    }

    #[test]
    fn test_judgement_generate_default_file() {
        let args = Args::parse_from(["jfall-rag", "judgement", "generate"]);
        match args.command {
            Some(Commands::Judgement {
                action: JudgementAction::Generate { file_name },
            }) => assert_eq!(file_name, "jfall_questions_answers_sample.csv"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = Args::parse_from([
            "jfall-rag",
            "retrieve",
            "Who talked about RAG?",
            "--splitter",
            "max-token",
            "--backup",
            "ollama-maxtoken-100-all",
        ]);
        assert_eq!(args.splitter, Some(SplitterKind::MaxToken));
        assert_eq!(args.backup.as_deref(), Some("ollama-maxtoken-100-all"));
    }

    #[test]
    fn test_demo_questions() {
        let args = Args::parse_from([
            "jfall-rag",
            "demo",
            "--question",
            "What is RAG?",
            "--question",
            "Which room hosts the keynote?",
            "--skip-judgement",
        ]);
        match args.command_or_default() {
            Commands::Demo {
                questions,
                skip_judgement,
            } => {
                assert_eq!(questions.len(), 2);
                assert!(skip_judgement);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
