//! Report envelope: one analysis plus the metadata describing how it was produced

use crate::processing::analyzer::AnalysisReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Wraps an analysis with generation metadata.
///
/// Timing and timestamps live here rather than in [`AnalysisReport`] so that
/// the analysis itself stays identical across repeated runs on the same input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub metadata: ReportMetadata,
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub embedding_model: String,
    pub resume_source: String,
    pub job_source: String,
    pub processing_time_ms: u64,
}

impl ReportEnvelope {
    pub fn new(
        analysis: AnalysisReport,
        embedding_model: impl Into<String>,
        resume_source: impl Into<String>,
        job_source: impl Into<String>,
        processing_time: Duration,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                embedding_model: embedding_model.into(),
                resume_source: resume_source.into(),
                job_source: job_source.into(),
                processing_time_ms: processing_time.as_millis() as u64,
            },
            analysis,
        }
    }
}

impl ReportMetadata {
    pub fn generated_at_display(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    /// File name of a source path; labels such as "inline" come back unchanged
    pub fn short_source(source: &str) -> String {
        Path::new(source)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| source.to_string())
    }
}

/// Similarity in [0, 1] as a whole percentage
pub fn as_percentage(score: f32) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_source() {
        assert_eq!(ReportMetadata::short_source("/tmp/cv/resume.pdf"), "resume.pdf");
        assert_eq!(ReportMetadata::short_source("inline"), "inline");
    }

    #[test]
    fn test_as_percentage() {
        assert_eq!(as_percentage(0.654), 65);
        assert_eq!(as_percentage(1.0), 100);
        assert_eq!(as_percentage(-0.2), 0);
    }
}
