//! Integration tests for input extraction and the file-based analysis flow

use resume_analyzer::catalog::Catalog;
use resume_analyzer::input::manager::InputManager;
use resume_analyzer::output::formatter::ReportGenerator;
use resume_analyzer::output::report::ReportEnvelope;
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::document::Document;
use resume_analyzer::processing::embeddings::TextEncoder;
use resume_analyzer::config::OutputFormat;
use resume_analyzer::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Bag-of-letters encoder: deterministic and dimension-stable
struct LetterCountEncoder;

impl TextEncoder for LetterCountEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let mut counts = vec![0.0f32; 26];
        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            counts[usize::from(c.to_ascii_lowercase() as u8 - b'a')] += 1.0;
        }
        Ok(counts)
    }

    fn model_name(&self) -> &str {
        "letter-count"
    }
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(Path::new("tests/fixtures/sample_resume.md")).await.unwrap();

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let first = manager.extract_text(path).await.unwrap();
    let second = manager.extract_text(path).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let mut manager = InputManager::new();

    assert!(manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await.is_err());
    assert!(manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await.is_err());
}

#[tokio::test]
async fn test_analyze_fixture_files() {
    let mut manager = InputManager::new();
    let resume_path = "tests/fixtures/sample_resume.txt";
    let job_path = "tests/fixtures/job_description.txt";

    let resume = Document::resume(manager.extract_text(Path::new(resume_path)).await.unwrap(), resume_path);
    let job = Document::job_description(manager.extract_text(Path::new(job_path)).await.unwrap(), job_path);

    let engine = AnalysisEngine::new(Arc::new(LetterCountEncoder), &Catalog::default()).unwrap();
    let analysis = engine.analyze(&resume, &job).unwrap();

    assert!(analysis.resume_skills.contains("JavaScript"));
    assert!(analysis.resume_skills.contains("Node.js"));
    assert!(!analysis.resume_skills.contains("Java"));
    assert_eq!(analysis.jd_skills.to_vec(), vec!["Communication", "Machine Learning", "Python", "SQL"]);
    assert_eq!(analysis.metrics.missing_skills.to_vec(), vec!["Machine Learning"]);
    assert!(analysis.similarity.score > 0.0 && analysis.similarity.score <= 1.0);
    assert!(analysis.metrics.ats.score > 0.0 && analysis.metrics.ats.score < 100.0);
    assert!(analysis.metrics.suggested_jobs.contains(&"Frontend Developer".to_string()));

    let envelope = ReportEnvelope::new(analysis, engine.model_name(), resume_path, job_path, Duration::from_millis(5));
    let generator = ReportGenerator::with_options(false, true, true, true);

    for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Html] {
        let rendered = generator.generate_report(&envelope, format).unwrap();
        assert!(rendered.contains("Machine Learning"));
    }
}
