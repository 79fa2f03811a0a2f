//! Retrieval quality measured against a judgement list

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::embedding::Embedder;
use crate::errors::Result;
use crate::quality::judgement::{read_judgement_list, QuestionAnswerRecord};
use crate::retrieval::Retriever;

/// Outcome of running a judgement list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalQuality {
    pub correct: usize,
    pub incorrect: usize,
}

impl RetrievalQuality {
    pub fn new(correct: usize, incorrect: usize) -> Self {
        Self { correct, incorrect }
    }

    pub fn total_items(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Share of questions whose best chunk was the expected one
    pub fn precision(&self) -> f64 {
        match self.total_items() {
            0 => 0.0,
            total => self.correct as f64 / total as f64,
        }
    }
}

/// Checks whether the retriever finds the chunk a question was generated from
pub struct RetrievalQualityService {
    retriever: Arc<dyn Retriever>,
}

impl RetrievalQualityService {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }

    pub fn read_question_answers(&self, path: &Path) -> Result<Vec<QuestionAnswerRecord>> {
        read_judgement_list(path)
    }

    pub async fn obtain_retrieval_quality(
        &self,
        records: &[QuestionAnswerRecord],
        embedder: &dyn Embedder,
    ) -> Result<RetrievalQuality> {
        let mut quality = RetrievalQuality::default();

        for record in records {
            let vector = embedder.embed(&record.question).await?;
            let found = self
                .retriever
                .find_relevant_chunks_by_vector(&vector, 1)
                .await?;

            let hit = found.first().is_some_and(|chunk| {
                chunk.document_id == record.document_id && chunk.chunk_id == record.chunk_id
            });

            debug!(
                question = %record.question,
                expected = %format!("{}_{}", record.document_id, record.chunk_id),
                found = ?found.first().map(|c| c.key()),
                hit,
                "Judged question"
            );

            if hit {
                quality.correct += 1;
            } else {
                quality.incorrect += 1;
            }
        }

        Ok(quality)
    }
}
