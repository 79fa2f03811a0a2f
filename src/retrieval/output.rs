//! Output of a retrieval strategy

use serde::{Deserialize, Serialize};

/// One piece of context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalOutputItem {
    pub document_id: String,
    pub chunk_id: usize,
    pub text: String,
}

/// Ordered context items selected by a strategy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalOutput {
    pub items: Vec<RetrievalOutputItem>,
}

impl RetrievalOutput {
    pub fn new(items: Vec<RetrievalOutputItem>) -> Self {
        Self { items }
    }

    /// Context passed to the answer generator: item texts joined by a space
    pub fn construct_context(&self) -> String {
        self.items
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
