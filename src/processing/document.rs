//! Document value type

use serde::{Deserialize, Serialize};

/// An immutable text blob fed into one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    content: String,
    source: String,
    document_type: DocumentType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Resume,
    JobDescription,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<String>, document_type: DocumentType) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
            document_type,
        }
    }

    pub fn resume(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(content, source, DocumentType::Resume)
    }

    pub fn job_description(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(content, source, DocumentType::JobDescription)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// File path, or a label such as "inline" when the text was not read from a file
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// True when the document carries no text at all (whitespace only counts as empty)
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Resume => write!(f, "Resume"),
            DocumentType::JobDescription => write!(f, "Job Description"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::resume("John Doe\nSoftware Engineer\n\nSkills: Rust, Python", "cv.txt");

        assert_eq!(doc.document_type(), DocumentType::Resume);
        assert_eq!(doc.source(), "cv.txt");
        assert_eq!(doc.word_count(), 7);
        assert!(!doc.is_blank());
    }

    #[test]
    fn test_blank_document() {
        let doc = Document::job_description(" \n\t ", "inline");
        assert!(doc.is_blank());
        assert_eq!(doc.word_count(), 0);
    }
}
