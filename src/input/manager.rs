//! Reads resumes and job descriptions from disk into documents

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::document::{Document, DocumentType};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Dispatches files to the extractor for their type and remembers the text per path
pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract text and wrap it as a document whose source is the file path
    pub async fn load_document(&mut self, path: &Path, document_type: DocumentType) -> Result<Document> {
        let text = self.extract_text(path).await?;
        Ok(Document::new(text, path.to_string_lossy(), document_type))
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(text) = self.cache.get(path).filter(|_| self.enable_cache) {
            debug!("Cache hit for {}", path.display());
            return Ok(text.clone());
        }

        let text = Self::read_file(path).await?;
        debug!("Read {} characters from {}", text.chars().count(), path.display());

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }
        Ok(text)
    }

    async fn read_file(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File does not exist: {}", path.display()
            )));
        }

        match FileType::from_path(path) {
            FileType::Pdf => PdfExtractor.extract(path).await,
            FileType::Text => PlainTextExtractor.extract(path).await,
            FileType::Markdown => MarkdownExtractor.extract(path).await,
            FileType::Unknown => Err(ResumeAnalyzerError::UnsupportedFormat(format!(
                "Unsupported file type for: {}", path.display()
            ))),
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("job.md");
        std::fs::write(&path, "## Role\n\n**Python** and SQL").unwrap();

        let mut manager = InputManager::new();
        let doc = manager.load_document(&path, DocumentType::JobDescription).await.unwrap();

        assert_eq!(doc.document_type(), DocumentType::JobDescription);
        assert!(doc.content().contains("Python and SQL"));
        assert_eq!(doc.source(), path.to_string_lossy());
    }

    #[tokio::test]
    async fn test_cache_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.txt");
        std::fs::write(&path, "first").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        assert_eq!(manager.extract_text(&path).await.unwrap(), "first");

        std::fs::write(&path, "second").unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "second");
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.docx");
        std::fs::write(&path, "binary").unwrap();

        let result = InputManager::new().extract_text(&path).await;
        assert!(matches!(result, Err(ResumeAnalyzerError::UnsupportedFormat(_))));
    }
}
