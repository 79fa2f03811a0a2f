//! Answer generation from a question and its retrieved context

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::errors::Result;
use crate::generation::ChatService;
use crate::ollama::ChatMessage;
use crate::tracker::RagTracker;

const ANSWER_INSTRUCTIONS: &str = "You are a helpful assistant answering questions about the \
talks of a conference. Answer the question using only the provided context. If the context \
does not contain the answer, say that you do not know. Keep the answer short.";

/// Produces an answer to a question given a context
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate_answer(&self, question: &str, context: &str) -> Result<String>;
}

pub(crate) fn answer_messages(question: &str, context: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ANSWER_INSTRUCTIONS),
        ChatMessage::user(format!(
            "Context: {}\n\nQuestion: {}\n\nAnswer:",
            context, question
        )),
    ]
}

/// Asks the chat service for an answer
pub struct BasicAnswerGenerator {
    chat_service: Arc<dyn ChatService>,
}

impl BasicAnswerGenerator {
    pub fn new(chat_service: Arc<dyn ChatService>) -> Self {
        Self { chat_service }
    }
}

#[async_trait]
impl AnswerGenerator for BasicAnswerGenerator {
    async fn generate_answer(&self, question: &str, context: &str) -> Result<String> {
        debug!(model = self.chat_service.model(), "Generating answer");
        let answer = self
            .chat_service
            .chat(answer_messages(question, context))
            .await?;
        Ok(answer.trim().to_string())
    }
}

/// Answer generator that records question, context and answer
pub struct ObservedAnswerGenerator {
    inner: BasicAnswerGenerator,
    tracker: RagTracker,
}

impl ObservedAnswerGenerator {
    pub fn new(chat_service: Arc<dyn ChatService>, tracker: RagTracker) -> Self {
        Self {
            inner: BasicAnswerGenerator::new(chat_service),
            tracker,
        }
    }
}

#[async_trait]
impl AnswerGenerator for ObservedAnswerGenerator {
    async fn generate_answer(&self, question: &str, context: &str) -> Result<String> {
        self.tracker.add_question(question);
        self.tracker.add_context(context);

        let answer = self.inner.generate_answer(question, context).await?;
        self.tracker.add_answer(&answer);

        Ok(answer)
    }
}
