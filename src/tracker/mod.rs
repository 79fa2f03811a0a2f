//! Tracking of a single question → context → answer round trip
//!
//! The observed retriever and observed answer generator write into a shared
//! [`RagTracker`]; the answer quality service reads the resulting
//! [`RagObserver`].

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

use crate::errors::Result;

/// Chunk recorded by the observed retriever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedChunk {
    pub key: String,
    pub text: String,
    pub score: f32,
}

/// Everything that happened while answering one question
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagObserver {
    pub question: String,
    pub context: String,
    pub answer: String,
    pub relevant_chunks: Vec<ObservedChunk>,
}

impl RagObserver {
    pub fn is_empty(&self) -> bool {
        self.question.is_empty() && self.answer.is_empty() && self.relevant_chunks.is_empty()
    }
}

/// Shared handle to the current observer
#[derive(Debug, Clone, Default)]
pub struct RagTracker {
    observer: Arc<Mutex<RagObserver>>,
}

impl RagTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_question(&self, question: &str) {
        self.lock().question = question.to_string();
    }

    pub fn add_context(&self, context: &str) {
        self.lock().context = context.to_string();
    }

    pub fn add_answer(&self, answer: &str) {
        self.lock().answer = answer.to_string();
    }

    /// Record a relevant chunk; a chunk found twice keeps its first entry
    pub fn add_relevant_chunk(&self, key: String, text: String, score: f32) {
        let mut observer = self.lock();
        if observer.relevant_chunks.iter().any(|c| c.key == key) {
            return;
        }
        observer.relevant_chunks.push(ObservedChunk { key, text, score });
    }

    /// Snapshot of the current observer
    pub fn observer(&self) -> RagObserver {
        self.lock().clone()
    }

    /// Reset the tracker, returning what was observed so far
    pub fn cleanup(&self) -> RagObserver {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, RagObserver> {
        self.observer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Destination for finished observers
pub trait ObserverPersistor: Send + Sync {
    fn persist(&self, observer: &RagObserver) -> Result<()>;
}

/// Writes the observer to the log
#[derive(Debug, Clone, Default)]
pub struct LoggingObserverPersistor;

impl ObserverPersistor for LoggingObserverPersistor {
    fn persist(&self, observer: &RagObserver) -> Result<()> {
        info!("Question: {}", observer.question);
        info!("Answer: {}", observer.answer);
        info!("Context: {}", observer.context);
        for chunk in &observer.relevant_chunks {
            info!("Relevant chunk {} ({:.4}): {}", chunk.key, chunk.score, chunk.text);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_records_round_trip() {
        let tracker = RagTracker::new();
        tracker.add_question("What is RAG?");
        tracker.add_relevant_chunk("rag_0".to_string(), "RAG is retrieval.".to_string(), 0.9);
        tracker.add_context("RAG is retrieval.");
        tracker.add_answer("Retrieval-augmented generation.");

        let observer = tracker.observer();
        assert_eq!(observer.question, "What is RAG?");
        assert_eq!(observer.relevant_chunks.len(), 1);
        assert_eq!(observer.answer, "Retrieval-augmented generation.");
    }

    #[test]
    fn test_clones_share_state() {
        let tracker = RagTracker::new();
        let clone = tracker.clone();
        clone.add_question("Who talked about RAG?");
        assert_eq!(tracker.observer().question, "Who talked about RAG?");
    }

    #[test]
    fn test_duplicate_chunks_recorded_once() {
        let tracker = RagTracker::new();
        tracker.add_relevant_chunk("a_0".to_string(), "x".to_string(), 0.5);
        tracker.add_relevant_chunk("a_0".to_string(), "x".to_string(), 0.7);
        assert_eq!(tracker.observer().relevant_chunks.len(), 1);
    }

    #[test]
    fn test_cleanup_resets() {
        let tracker = RagTracker::new();
        tracker.add_question("q");
        let previous = tracker.cleanup();
        assert_eq!(previous.question, "q");
        assert!(tracker.observer().is_empty());
    }

    #[test]
    fn test_logging_persistor() {
        let observer = RagObserver {
            question: "q".to_string(),
            ..Default::default()
        };
        assert!(LoggingObserverPersistor.persist(&observer).is_ok());
    }
}
