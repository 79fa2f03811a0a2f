//! Question generation for judgement lists

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::{RagError, Result};
use crate::generation::parse::clean_line;
use crate::generation::ChatService;
use crate::ollama::ChatMessage;
use crate::quality::judgement::{write_judgement_list, QuestionAnswerRecord};
use crate::retrieval::Retriever;

const QUESTION_INSTRUCTIONS: &str = "You are a quiz master. You receive a piece of text and \
write exactly one question that is answered by that text. Respond with the question only, \
without introduction or quotes.";

/// Writes a question that a given text answers
pub struct QuestionGenerator {
    chat_service: Arc<dyn ChatService>,
}

impl QuestionGenerator {
    pub fn new(chat_service: Arc<dyn ChatService>) -> Self {
        Self { chat_service }
    }

    pub async fn generate_question(&self, text: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(QUESTION_INSTRUCTIONS),
            ChatMessage::user(text),
        ];
        let question = clean_line(&self.chat_service.chat(messages).await?);

        if question.is_empty() {
            return Err(RagError::InvalidModelResponse(
                "empty question generated".to_string(),
            ));
        }
        Ok(question)
    }
}

/// Generates one question per stored chunk
pub struct QuestionGeneratorService {
    retriever: Arc<dyn Retriever>,
    generator: QuestionGenerator,
}

impl QuestionGeneratorService {
    pub fn new(retriever: Arc<dyn Retriever>, generator: QuestionGenerator) -> Self {
        Self {
            retriever,
            generator,
        }
    }

    pub async fn generate_question_answer_pairs(&self) -> Result<Vec<QuestionAnswerRecord>> {
        let chunks = self.retriever.chunks().await;
        if chunks.is_empty() {
            return Err(RagError::EmptyStore);
        }

        let mut records = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let question = self.generator.generate_question(&chunk.text).await?;
            debug!(key = %chunk.key(), %question, "Generated question");

            records.push(QuestionAnswerRecord {
                document_id: chunk.document_id,
                chunk_id: chunk.chunk_id,
                text: chunk.text,
                question,
            });
        }

        Ok(records)
    }

    /// Generate the pairs and write them to `{dir}/{file_name}`
    pub async fn generate_question_answer_pairs_and_save(
        &self,
        dir: &Path,
        file_name: &str,
    ) -> Result<PathBuf> {
        let records = self.generate_question_answer_pairs().await?;
        let path = dir.join(file_name);
        write_judgement_list(&path, &records)?;

        info!("Generated {} questions", records.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::indexing::Chunk;
    use crate::quality::judgement::read_judgement_list;
    use crate::retrieval::RelevantChunk;

    /// Turns the text it receives into a question
    struct QuizChat;

    #[async_trait]
    impl ChatService for QuizChat {
        async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
            let text = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(format!("\"What about {}?\"", text.trim_end_matches('.')))
        }

        fn model(&self) -> &str {
            "quiz"
        }
    }

    struct ListRetriever(Vec<Chunk>);

    #[async_trait]
    impl Retriever for ListRetriever {
        async fn find_relevant_chunks(&self, _q: &str, _max: usize) -> Result<Vec<RelevantChunk>> {
            Ok(Vec::new())
        }

        async fn find_relevant_chunks_by_vector(
            &self,
            _vector: &[f32],
            _max: usize,
        ) -> Result<Vec<RelevantChunk>> {
            Ok(Vec::new())
        }

        async fn get_chunk(&self, _document_id: &str, _chunk_id: usize) -> Option<Chunk> {
            None
        }

        async fn chunks(&self) -> Vec<Chunk> {
            self.0.clone()
        }
    }

    fn service(chunks: Vec<Chunk>) -> QuestionGeneratorService {
        QuestionGeneratorService::new(
            Arc::new(ListRetriever(chunks)),
            QuestionGenerator::new(Arc::new(QuizChat)),
        )
    }

    fn chunk(chunk_id: usize, text: &str) -> Chunk {
        Chunk {
            document_id: "rag-talk".to_string(),
            chunk_id,
            total_chunks: 2,
            text: text.to_string(),
            properties: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_question_is_cleaned() {
        let generator = QuestionGenerator::new(Arc::new(QuizChat));
        let question = generator.generate_question("RAG.").await.unwrap();
        assert_eq!(question, "What about RAG?");
    }

    #[tokio::test]
    async fn test_one_pair_per_chunk() {
        let records = service(vec![chunk(0, "Embeddings."), chunk(1, "Retrieval.")])
            .generate_question_answer_pairs()
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].chunk_id, 1);
        assert_eq!(records[1].text, "Retrieval.");
        assert_eq!(records[1].question, "What about Retrieval?");
    }

    #[tokio::test]
    async fn test_empty_store_is_an_error() {
        let result = service(Vec::new()).generate_question_answer_pairs().await;
        assert!(matches!(result, Err(RagError::EmptyStore)));
    }

    #[tokio::test]
    async fn test_pairs_saved_as_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = service(vec![chunk(0, "Embeddings.")])
            .generate_question_answer_pairs_and_save(dir.path(), "questions.csv")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("questions.csv"));
        assert_eq!(read_judgement_list(&path).unwrap().len(), 1);
    }
}
