//! Resume analyzer: score a resume against a job description

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_analyzer::config::Config;
use resume_analyzer::error::{Result, ResumeAnalyzerError};
use resume_analyzer::input::manager::InputManager;
use resume_analyzer::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use resume_analyzer::output::report::ReportEnvelope;
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::document::{Document, DocumentType};
use resume_analyzer::processing::embedding_manager::EmbeddingModelManager;
use resume_analyzer::processing::embeddings::Model2VecEncoder;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};
use unicode_segmentation::UnicodeSegmentation;

const INPUT_EXTENSIONS: [&str; 4] = ["pdf", "txt", "md", "markdown"];
const INLINE_SOURCE: &str = "inline";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            embedding,
            detailed,
            output,
            save,
        } => {
            let start_time = Instant::now();

            cli::validate_file_extension(&resume, &INPUT_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job_path) = &job {
                cli::validate_file_extension(job_path, &INPUT_EXTENSIONS)
                    .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
            }

            let output_format = match &output {
                Some(format) => cli::parse_output_format(format).map_err(ResumeAnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let mut input_manager = InputManager::new();
            let resume_doc = input_manager.load_document(&resume, DocumentType::Resume).await?;
            let job_doc = match (job, job_text) {
                (Some(job_path), _) => input_manager.load_document(&job_path, DocumentType::JobDescription).await?,
                (None, Some(text)) => Document::job_description(text, INLINE_SOURCE),
                (None, None) => {
                    return Err(ResumeAnalyzerError::InvalidInput(
                        "Either --job or --job-text is required".to_string(),
                    ));
                }
            };

            info!("Resume: {} words, job description: {} words",
                resume_doc.word_count(), job_doc.word_count());

            if detailed {
                println!("Resume preview:\n{}\n", truncate_text(resume_doc.content(), 300));
                println!("Job description preview:\n{}\n", truncate_text(job_doc.content(), 300));
            }

            let mut model_manager = EmbeddingModelManager::new(
                config.models_dir().to_path_buf(),
                config.models.available_models.clone(),
            ).await?;
            let requested_model = embedding.unwrap_or_else(|| config.models.default_embedding_model.clone());
            let model_id = model_manager.resolve_model_id(&requested_model)
                .ok_or(ResumeAnalyzerError::ModelNotFound(requested_model))?;
            let model_path = model_manager.ensure_model_available(&model_id).await?;

            let spinner = spinner(format!("Loading embedding model {}", model_id));
            let encoder = Model2VecEncoder::load(&model_path, model_id.clone());
            spinner.finish_and_clear();
            let encoder = Arc::new(encoder?);

            let engine = AnalysisEngine::new(encoder, &config.catalog)?;
            let analysis = engine.analyze(&resume_doc, &job_doc)?;
            let envelope = ReportEnvelope::new(
                analysis,
                engine.model_name(),
                resume_doc.source(),
                job_doc.source(),
                start_time.elapsed(),
            );

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed, true, true);
            let rendered = generator.generate_report(&envelope, output_format)?;

            match save {
                Some(path) => {
                    let path = resolve_save_path(&path, output_format, resume_doc.source());
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Skills => {
            println!("Recognized skills ({}):\n", config.catalog.skills.len());
            for skill in &config.catalog.skills {
                let jobs = config.catalog.jobs_for_skill(skill);
                println!("  • {}", skill);
                if let Some(url) = config.catalog.learning_url(skill) {
                    println!("      learn: {}", url);
                }
                if !jobs.is_empty() {
                    println!("      jobs:  {}", jobs.join(", "));
                }
            }
        }

        Commands::Models { action } => {
            let mut model_manager = EmbeddingModelManager::new(
                config.models_dir().to_path_buf(),
                config.models.available_models.clone(),
            ).await?;

            match action {
                ModelAction::List => {
                    println!("Embedding models:\n");
                    for model in model_manager.list_available_models() {
                        let status = if model_manager.is_model_downloaded(&model.id) {
                            "downloaded"
                        } else {
                            "available"
                        };
                        let default_marker = if model.id == config.models.default_embedding_model {
                            " (default)"
                        } else {
                            ""
                        };
                        println!("  • {}{} - {} ({} MB) [{}]", model.id, default_marker, model.name, model.size_mb, status);
                        println!("    {}", model.description);
                    }

                    if model_manager.list_downloaded_models().is_empty() {
                        println!("\nNo models downloaded yet. Get started with:");
                        println!("   resume-analyzer models download {}", config.models.default_embedding_model);
                    }
                }

                ModelAction::Download { model } => {
                    let model_id = model_manager.resolve_model_id(&model)
                        .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(model.clone()))?;

                    if model_manager.is_model_downloaded(&model_id) {
                        println!("Model '{}' is already downloaded", model_id);
                        return Ok(());
                    }

                    let spinner = spinner(format!("Downloading {}", model_id));
                    let result = model_manager.download_model(&model_id).await;
                    spinner.finish_and_clear();

                    let model_path = result?;
                    println!("Model '{}' downloaded to {}", model_id, model_path.display());
                }

                ModelAction::Remove { model } => {
                    let model_id = model_manager.resolve_model_id(&model).unwrap_or(model);
                    let removed = model_manager.remove_model(&model_id).await?;
                    println!("Removed model '{}' from {}", model_id, removed.display());
                }

                ModelAction::Info { model } => {
                    let model_id = model_manager.resolve_model_id(&model)
                        .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(model.clone()))?;
                    let model_info = model_manager.get_model_info(&model_id)
                        .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(model.clone()))?;

                    println!("Id: {}", model_info.id);
                    println!("Name: {}", model_info.name);
                    println!("Repository: {}", model_info.repo_id);
                    println!("Size: {} MB", model_info.size_mb);
                    println!("Dimensions: {}", model_info.dimensions);
                    println!("Description: {}", model_info.description);

                    match model_manager.get_model_path(&model_id) {
                        Some(path) => println!("Status: downloaded ({})", path.display()),
                        None => {
                            println!("Status: not downloaded");
                            println!("\nTo download this model, run:");
                            println!("   resume-analyzer models download {}", model_id);
                        }
                    }
                }
            }
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration file: {}\n", config_path.display());
                    println!("Models directory: {}", config.models_dir().display());
                    println!("Default embedding model: {}", config.models.default_embedding_model);
                    println!("Output format: {:?}", config.output.format);
                    println!("Detailed output: {}", config.output.detailed);
                    println!("Colored output: {}", config.output.color_output);
                    println!("\nCatalog:");
                    println!("  Skills: {}", config.catalog.skills.len());
                    println!("  Learning resources: {}", config.catalog.learning_resources.len());
                    println!("  Job suggestions: {}", config.catalog.job_suggestions.len());
                    println!("  Salary insights: {}", config.catalog.salary_insights.len());
                    println!("  Job platforms: {}", config.catalog.job_platforms.len());
                    println!("  Career paths: {}", config.catalog.career_paths.len());
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&config_path)?;
                    println!("Configuration reset to defaults at {}", config_path.display());
                }
            }
        }
    }

    Ok(())
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Truncate text to at most `max_graphemes` characters, cutting at a word boundary
fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return text.to_string();
    }

    let truncated = graphemes[..max_graphemes].concat();
    let cut = truncated.rfind(char::is_whitespace).unwrap_or(truncated.len());
    format!("{}...", &truncated[..cut])
}
