//! CLI module for jfall-rag
//!
//! Handles command-line argument parsing and configuration management.

pub mod config;
pub mod args;

pub use config::Config;
pub use args::{Args, Commands, JudgementAction, Verbosity};
