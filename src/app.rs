//! The RAG demo application
//!
//! [`AppRag`] wires the content store, retriever, chat service and retrieval
//! strategy together and exposes the steps of the demo: ingest (or load a
//! backup), retrieve, judge retrieval with a judgement list, answer, and
//! answer while observing the pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::cli::Config;
use crate::embedding::{Embedder, OllamaEmbedder};
use crate::errors::Result;
use crate::generation::{
    AnswerGenerator, BasicAnswerGenerator, ChatService, ObservedAnswerGenerator,
    OllamaChatService, QuestionGenerator, QuestionGeneratorService,
};
use crate::indexing::{IndexingReport, IndexingService, JfallContentReader, Splitter};
use crate::ollama::OllamaAccess;
use crate::quality::{AnswerQuality, AnswerQualityService, RetrievalQuality, RetrievalQualityService};
use crate::retrieval::strategies::{create_strategy, StrategyKind};
use crate::retrieval::{ObservedRetriever, RelevantChunk, RetrievalStrategy, Retriever};
use crate::store::InternalContentStore;
use crate::tracker::{LoggingObserverPersistor, ObserverPersistor, RagObserver, RagTracker};

const SEPARATOR: &str = "---------------------------------------";

/// Result of an observed answer
#[derive(Debug, Clone)]
pub struct ObservedAnswer {
    pub observer: RagObserver,
    pub quality: AnswerQuality,
}

/// Retrieval-augmented generation over the JFall talks
pub struct AppRag {
    ollama: OllamaAccess,
    embedder: Arc<dyn Embedder>,
    content_store: Arc<InternalContentStore>,
    retriever: Arc<ObservedRetriever>,
    tracker: RagTracker,
    chat_service: Arc<dyn ChatService>,
    retrieval_strategy: Arc<dyn RetrievalStrategy>,
    backup_dir: PathBuf,
    judgement_dir: PathBuf,
    temperature: f32,
    show_progress: bool,
}

impl AppRag {
    /// Build the application with Ollama services from the configuration
    pub fn new(config: &Config) -> Result<Self> {
        let ollama = OllamaAccess::with_config(
            &config.ollama_url(),
            Duration::from_secs(config.ollama.timeout_secs),
        )?;
        let embedder: Arc<dyn Embedder> = Arc::new(OllamaEmbedder::with_model(
            ollama.clone(),
            config.ollama.embedding_model.clone(),
        ));
        let chat_service: Arc<dyn ChatService> = Arc::new(
            OllamaChatService::new(ollama.clone(), config.ollama.chat_model.clone())
                .with_temperature(config.ollama.temperature),
        );

        let mut app = Self::with_services(ollama, embedder, chat_service)
            .with_backup_dir(config.data.backup_dir.clone())
            .with_judgement_dir(config.judgement_dir())
            .with_progress(config.indexing.show_progress);
        app.temperature = config.ollama.temperature;

        let strategy = create_strategy(
            config.retrieval.strategy,
            app.retriever(),
            config.retrieval.window_size,
        );
        app.modify_retrieval_strategy(strategy);

        Ok(app)
    }

    /// Build the application around the given services with the top-n strategy
    pub fn with_services(
        ollama: OllamaAccess,
        embedder: Arc<dyn Embedder>,
        chat_service: Arc<dyn ChatService>,
    ) -> Self {
        let tracker = RagTracker::new();
        let content_store = Arc::new(InternalContentStore::new(embedder.clone()));
        let retriever = Arc::new(ObservedRetriever::new(
            content_store.clone(),
            tracker.clone(),
        ));
        let retrieval_strategy = create_strategy(StrategyKind::TopN, retriever.clone(), 1);

        Self {
            ollama,
            embedder,
            content_store,
            retriever,
            tracker,
            chat_service,
            retrieval_strategy,
            backup_dir: PathBuf::from("backups"),
            judgement_dir: std::env::temp_dir(),
            temperature: 0.0,
            show_progress: false,
        }
    }

    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = dir.into();
        self
    }

    pub fn with_judgement_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.judgement_dir = dir.into();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Read the talks from a JSONL file, split them and store the chunks
    pub async fn ingest_data(&self, splitter: &dyn Splitter, file: &Path) -> Result<IndexingReport> {
        let reader = JfallContentReader::new(file);
        let indexing_service =
            IndexingService::new(self.content_store.clone()).with_progress(self.show_progress);
        indexing_service.index_documents(&reader, splitter).await
    }

    /// Replace the store contents with a backup from the backup directory
    pub async fn load_backup(&self, backup_name: &str) -> Result<usize> {
        self.content_store
            .load_from_disk(&self.backup_dir, backup_name)
            .await
    }

    /// Write the store contents to the backup directory
    pub async fn store_backup(&self, backup_name: &str) -> Result<PathBuf> {
        let path = self
            .content_store
            .backup_to_disk(&self.backup_dir, backup_name)
            .await?;
        info!("Backup stored at: {}", path.display());
        Ok(path)
    }

    /// Switch the chat service to another Ollama model
    pub fn modify_chat_service(&mut self, model: &str) {
        self.chat_service = Arc::new(
            OllamaChatService::new(self.ollama.clone(), model).with_temperature(self.temperature),
        );
    }

    /// Use another retrieval strategy, typically built on [`AppRag::retriever`]
    pub fn modify_retrieval_strategy(&mut self, strategy: Arc<dyn RetrievalStrategy>) {
        info!("Using retrieval strategy: {}", strategy.name());
        self.retrieval_strategy = strategy;
    }

    /// The observed retriever
    pub fn retriever(&self) -> Arc<dyn Retriever> {
        self.retriever.clone()
    }

    pub fn chat_service(&self) -> Arc<dyn ChatService> {
        self.chat_service.clone()
    }

    pub fn content_store(&self) -> &Arc<InternalContentStore> {
        &self.content_store
    }

    pub fn tracker(&self) -> &RagTracker {
        &self.tracker
    }

    /// Log the chunks most similar to the question
    pub async fn retrieve_related_chunks(
        &self,
        question: &str,
        max_results: usize,
    ) -> Result<Vec<RelevantChunk>> {
        let relevant_chunks = self
            .content_store
            .find_relevant_chunks(question, max_results)
            .await?;

        for chunk in &relevant_chunks {
            info!("Document id: {}", chunk.document_id);
            info!("Chunk id: {}", chunk.chunk_id);
            info!("Text: {}", chunk.text);
            info!("Score: {}", chunk.score);
            log_separator();
        }

        Ok(relevant_chunks)
    }

    /// Answer a question with the context of the retrieval strategy
    pub async fn answer_question(&self, question: &str, max_results: usize) -> Result<String> {
        let generator = BasicAnswerGenerator::new(self.chat_service.clone());
        let answer = self.retrieve_answer(&generator, question, max_results).await?;
        log_separator();
        Ok(answer)
    }

    /// Generate a question per chunk and save the list in the judgement directory
    pub async fn generate_judgement_list(&self, file_name: &str) -> Result<PathBuf> {
        let service = QuestionGeneratorService::new(
            self.content_store.clone(),
            QuestionGenerator::new(self.chat_service.clone()),
        );
        let path = service
            .generate_question_answer_pairs_and_save(&self.judgement_dir, file_name)
            .await?;
        info!("Saved file: {}", path.display());
        Ok(path)
    }

    /// Measure how often the retriever finds the chunk a question came from
    pub async fn run_judgement_list(&self, path: &Path) -> Result<RetrievalQuality> {
        let service = RetrievalQualityService::new(self.retriever());
        let records = service.read_question_answers(path)?;
        let quality = service
            .obtain_retrieval_quality(&records, self.embedder.as_ref())
            .await?;

        info!("Correct: {}", quality.correct);
        info!("Incorrect: {}", quality.incorrect);
        info!("Quality using precision: {}", quality.precision());
        info!("Total questions: {}", quality.total_items());
        log_separator();

        Ok(quality)
    }

    /// Answer a question, log the observed pipeline and judge the answer
    pub async fn answer_question_observed(
        &self,
        question: &str,
        max_results: usize,
    ) -> Result<ObservedAnswer> {
        self.tracker.cleanup();

        let generator = ObservedAnswerGenerator::new(self.chat_service.clone(), self.tracker.clone());
        self.retrieve_answer(&generator, question, max_results).await?;
        let observer = self.tracker.cleanup();

        LoggingObserverPersistor.persist(&observer)?;

        let quality = AnswerQualityService::new(self.chat_service.clone())
            .determine_quality_of_answer(&observer)
            .await?;
        info!(
            "Quality of answer compared to the question: {}, Reason: {}",
            quality.answer_to_question.quality, quality.answer_to_question.reason
        );
        info!(
            "Quality of answer coming from the context: {}, Reason: {}",
            quality.answer_from_context.quality, quality.answer_from_context.reason
        );
        log_separator();

        Ok(ObservedAnswer { observer, quality })
    }

    async fn retrieve_answer(
        &self,
        generator: &dyn AnswerGenerator,
        question: &str,
        max_results: usize,
    ) -> Result<String> {
        let output = self.retrieval_strategy.retrieve(question, max_results).await?;
        let answer = generator
            .generate_answer(question, &output.construct_context())
            .await?;
        info!("Question: {}", question);
        info!("Answer: {}", answer);
        Ok(answer)
    }
}

fn log_separator() {
    info!("{}", SEPARATOR);
}
