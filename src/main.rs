//! jfall-rag - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use jfall_rag::{
    bootstrap::{Bootstrap, BootstrapStatus, EXIT_CODE_SETUP_NEEDED},
    cli::{Args, Commands, Config, JudgementAction},
    indexing::splitters::create_splitter,
    logging::init_logging,
    ollama::OllamaAccess,
    AppRag,
};

const DEFAULT_QUESTIONS: [&str; 2] = ["What is RAG?", "Who talked about RAG?"];
const DEFAULT_JUDGEMENT_FILE: &str = "jfall_questions_answers_sample.csv";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_args(&args)?;

    let level = args
        .verbosity()
        .log_level()
        .map(str::to_string)
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&level, config.logging.format);

    match args.command_or_default() {
        Commands::Config { init } => show_config(&args, &config, init),
        Commands::Models => list_models(&config).await,
        command => {
            ensure_ollama_ready(&config).await?;
            run(&args, &config, command).await
        }
    }
}

async fn run(args: &Args, config: &Config, command: Commands) -> Result<()> {
    let app = AppRag::new(config)?;
    let max_results = config.retrieval.max_results;

    // Step 1: Ingest data or load a backup
    prepare_store(args, config, &app).await?;

    match command {
        Commands::Demo {
            questions,
            skip_judgement,
        } => {
            let questions: Vec<String> = if questions.is_empty() {
                DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect()
            } else {
                questions
            };

            // Step 2: Retrieve related chunks
            for question in &questions {
                app.retrieve_related_chunks(question, max_results).await?;
            }

            // Step 2a and 2b: Generate a judgement list and measure retrieval quality
            if !skip_judgement {
                let path = judgement_list_for_demo(args, config, &app).await?;
                app.run_judgement_list(&path).await?;
            }

            // Step 3: Generate answers
            for question in &questions {
                app.answer_question(question, max_results).await?;
            }

            // Step 4: Answer while tracking the quality of the RAG system
            for question in &questions {
                app.answer_question_observed(question, max_results).await?;
            }
        }
        Commands::Retrieve { question } => {
            app.retrieve_related_chunks(&question, max_results).await?;
        }
        Commands::Answer { question, observed } => {
            if observed {
                app.answer_question_observed(&question, max_results).await?;
            } else {
                app.answer_question(&question, max_results).await?;
            }
        }
        Commands::Judgement { action } => match action {
            JudgementAction::Generate { file_name } => {
                app.generate_judgement_list(&file_name).await?;
            }
            JudgementAction::Run { path } => {
                app.run_judgement_list(&path).await?;
            }
        },
        Commands::Backup { name } => {
            let path = app.store_backup(&name).await?;
            println!("{} Backup '{}' written to {}", "✓".green(), name, path.display());
        }
        Commands::Models | Commands::Config { .. } => {}
    }

    Ok(())
}

/// Fill the content store from a backup or by ingesting the data file
async fn prepare_store(args: &Args, config: &Config, app: &AppRag) -> Result<()> {
    let creating_backup = matches!(args.command, Some(Commands::Backup { .. }));

    if let Some(name) = args.backup.as_deref().filter(|_| !creating_backup) {
        let chunks = app
            .load_backup(name)
            .await
            .with_context(|| format!("Failed to load backup '{}'", name))?;
        info!("Loaded {} chunks from backup '{}'", chunks, name);
        return Ok(());
    }

    let splitter = create_splitter(
        config.indexing.splitter,
        config.indexing.max_tokens,
        app.chat_service(),
    )?;
    app.ingest_data(splitter.as_ref(), &config.data.file)
        .await
        .with_context(|| format!("Failed to ingest {}", config.data.file.display()))?;

    Ok(())
}

/// A backup ships with a judgement list next to it; otherwise generate one
async fn judgement_list_for_demo(args: &Args, config: &Config, app: &AppRag) -> Result<PathBuf> {
    if let Some(name) = args.backup.as_deref() {
        let shipped = config
            .data
            .backup_dir
            .join(format!("jfall_judgment-{}.csv", name));
        if shipped.exists() {
            info!("Using judgement list {}", shipped.display());
            return Ok(shipped);
        }
        warn!("No judgement list found at {}, generating one", shipped.display());
    }

    Ok(app.generate_judgement_list(DEFAULT_JUDGEMENT_FILE).await?)
}

/// Exit with setup instructions when Ollama or a model is missing
async fn ensure_ollama_ready(config: &Config) -> Result<()> {
    let url = config.ollama_url();
    let bootstrap = Bootstrap::new(ollama_access(config)?);

    let models = [
        config.ollama.chat_model.as_str(),
        config.ollama.embedding_model.as_str(),
    ];

    match bootstrap.check(&models).await? {
        BootstrapStatus::Ready => Ok(()),
        BootstrapStatus::OllamaNotRunning => {
            Bootstrap::show_ollama_install_instructions(&url);
            std::process::exit(EXIT_CODE_SETUP_NEEDED);
        }
        BootstrapStatus::ModelNotAvailable(model) => {
            Bootstrap::show_model_pull_instructions(&model);
            std::process::exit(EXIT_CODE_SETUP_NEEDED);
        }
    }
}

fn ollama_access(config: &Config) -> Result<OllamaAccess> {
    Ok(OllamaAccess::with_config(
        &config.ollama_url(),
        Duration::from_secs(config.ollama.timeout_secs),
    )?)
}

async fn list_models(config: &Config) -> Result<()> {
    let access = ollama_access(config)?;

    println!("\nChecking Ollama models...\n");

    match access.list_models().await {
        Ok(models) => {
            if models.is_empty() {
                println!("No models installed.");
                println!("\nPull the default models with:");
                println!("  ollama pull {}", config.ollama.chat_model);
                println!("  ollama pull {}", config.ollama.embedding_model);
            } else {
                println!("Available models:");
                for model in models {
                    println!("  • {}", model);
                }
            }
            println!();
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("\nIs Ollama running? Start with: ollama serve");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn show_config(args: &Args, config: &Config, init: bool) -> Result<()> {
    if init {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => Config::default_path().context("Could not determine home directory")?,
        };
        Config::default().save(&path)?;
        println!("{} Wrote default configuration to {}", "✓".green(), path.display());
        return Ok(());
    }

    println!("\n{}\n", "jfall-rag Configuration".bold());
    println!("{}", config.to_toml()?);
    println!("Verbosity: {:?}", args.verbosity());
    println!();

    Ok(())
}
