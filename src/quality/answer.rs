//! Answer quality judged by the chat model

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::{RagError, Result};
use crate::generation::parse::extract_json_object;
use crate::generation::ChatService;
use crate::ollama::ChatMessage;
use crate::tracker::RagObserver;

const QUESTION_JUDGE_INSTRUCTIONS: &str = "You judge how well an answer responds to a question. \
Give a quality score from 1 (does not answer the question) to 5 (fully answers the question) \
and a short reason. Respond only with a JSON object: {\"quality\": <1-5>, \"reason\": \"...\"}";

const CONTEXT_JUDGE_INSTRUCTIONS: &str = "You judge whether an answer is based on the provided \
context. Give a quality score from 1 (not found in the context) to 5 (completely supported by the \
context) and a short reason. Respond only with a JSON object: {\"quality\": <1-5>, \"reason\": \"...\"}";

/// Score from 1 to 5 with the judge's explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality {
    pub quality: u8,
    pub reason: String,
}

/// Judgement of one observed answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerQuality {
    pub answer_to_question: Quality,
    pub answer_from_context: Quality,
}

/// Lets the chat model grade an answer
pub struct AnswerQualityService {
    chat_service: Arc<dyn ChatService>,
}

impl AnswerQualityService {
    pub fn new(chat_service: Arc<dyn ChatService>) -> Self {
        Self { chat_service }
    }

    pub async fn determine_quality_of_answer(&self, observer: &RagObserver) -> Result<AnswerQuality> {
        let answer_to_question = self
            .judge(
                QUESTION_JUDGE_INSTRUCTIONS,
                format!(
                    "Question: {}\n\nAnswer: {}",
                    observer.question, observer.answer
                ),
            )
            .await?;

        let answer_from_context = self
            .judge(
                CONTEXT_JUDGE_INSTRUCTIONS,
                format!("Context: {}\n\nAnswer: {}", observer.context, observer.answer),
            )
            .await?;

        Ok(AnswerQuality {
            answer_to_question,
            answer_from_context,
        })
    }

    async fn judge(&self, instructions: &str, prompt: String) -> Result<Quality> {
        let messages = vec![ChatMessage::system(instructions), ChatMessage::user(prompt)];
        let response = self.chat_service.chat(messages).await?;
        debug!(model = self.chat_service.model(), %response, "Judge response");
        parse_quality(&response)
    }
}

/// Parse a judge response into a [`Quality`]
pub fn parse_quality(response: &str) -> Result<Quality> {
    let json = extract_json_object(response).ok_or_else(|| {
        RagError::InvalidModelResponse(format!("no JSON object in judge response: {}", response))
    })?;

    let quality: Quality = serde_json::from_str(json).map_err(|e| {
        warn!("Failed to parse answer quality: {} - Response: {}", e, response);
        RagError::InvalidModelResponse(format!("invalid quality format: {}", e))
    })?;

    if !(1..=5).contains(&quality.quality) {
        return Err(RagError::InvalidModelResponse(format!(
            "quality {} outside 1..=5",
            quality.quality
        )));
    }

    Ok(quality)
}
