//! Indexing service: reader → splitter → content store

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::indexing::reader::ContentReader;
use crate::indexing::splitters::Splitter;
use crate::store::ContentStore;

/// Outcome of an indexing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexingReport {
    pub documents: usize,
    pub chunks: usize,
}

/// Reads documents, splits them and hands the chunks to a content store
pub struct IndexingService {
    store: Arc<dyn ContentStore>,
    show_progress: bool,
}

impl IndexingService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            show_progress: false,
        }
    }

    /// Show a progress bar while documents are embedded
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn index_documents(
        &self,
        reader: &dyn ContentReader,
        splitter: &dyn Splitter,
    ) -> Result<IndexingReport> {
        let documents = reader.read()?;
        let progress = self.progress_bar(documents.len() as u64);
        let mut chunk_count = 0;

        for document in &documents {
            progress.set_message(document.document_id.clone());

            let chunks = splitter.split(document).await?;
            debug!(
                document_id = %document.document_id,
                chunks = chunks.len(),
                splitter = splitter.name(),
                "Split document"
            );

            chunk_count += chunks.len();
            self.store.store(chunks).await?;
            progress.inc(1);
        }

        progress.finish_and_clear();

        let report = IndexingReport {
            documents: documents.len(),
            chunks: chunk_count,
        };
        info!(
            "Indexed {} documents into {} chunks using the {} splitter",
            report.documents,
            report.chunks,
            splitter.name()
        );

        Ok(report)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar
    }
}
