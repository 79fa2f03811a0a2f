//! Generation: everything that talks to the chat model
//!
//! - Chat service over Ollama
//! - Answer generators, plain and observed
//! - Question generation for judgement lists

pub mod answer;
pub mod chat;
pub mod parse;
pub mod question;

pub use answer::{AnswerGenerator, BasicAnswerGenerator, ObservedAnswerGenerator};
pub use chat::{ChatService, OllamaChatService, DEFAULT_CHAT_MODEL};
pub use question::{QuestionGenerator, QuestionGeneratorService};
