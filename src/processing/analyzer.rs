//! Analysis pipeline combining skill extraction, keyword overlap and semantic similarity

use crate::catalog::Catalog;
use crate::error::Result;
use crate::processing::document::Document;
use crate::processing::embeddings::{cosine_similarity, SimilarityScore, TextEncoder};
use crate::processing::metrics::{aggregate, Metrics};
use crate::processing::skills::{SkillExtractor, SkillSet};
use crate::processing::text_processor::{KeywordNormalizer, KeywordSet};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Main analysis engine. Holds no per-run state, so one engine can serve
/// any number of analyses, including concurrent ones.
pub struct AnalysisEngine {
    encoder: Arc<dyn TextEncoder>,
    skill_extractor: SkillExtractor,
    normalizer: KeywordNormalizer,
    catalog: Catalog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub similarity: SimilarityScore,
    pub resume_skills: SkillSet,
    pub jd_skills: SkillSet,
    pub metrics: Metrics,
    /// Non-fatal input problems, such as an empty document
    pub notices: Vec<InputNotice>,
    pub resume_word_count: usize,
    pub jd_word_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputNotice {
    EmptyResume,
    EmptyJobDescription,
}

impl InputNotice {
    pub fn message(&self) -> &'static str {
        match self {
            InputNotice::EmptyResume => "No text could be extracted from the resume; scores were computed from empty input.",
            InputNotice::EmptyJobDescription => "The job description is empty; scores were computed from empty input.",
        }
    }
}

impl AnalysisEngine {
    pub fn new(encoder: Arc<dyn TextEncoder>, catalog: &Catalog) -> Result<Self> {
        let skill_extractor = SkillExtractor::new(&catalog.skills)?;

        debug!("Analysis engine ready with {} vocabulary skills", skill_extractor.skill_count());

        Ok(Self {
            encoder,
            skill_extractor,
            normalizer: KeywordNormalizer::new(),
            catalog: catalog.clone(),
        })
    }

    pub fn model_name(&self) -> &str {
        self.encoder.model_name()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run the full pipeline over a resume and a job description
    pub fn analyze(&self, resume: &Document, job: &Document) -> Result<AnalysisReport> {
        info!("Analyzing {} against {}", resume.source(), job.source());

        let mut notices = Vec::new();
        if resume.is_blank() {
            warn!("Resume {} has no text", resume.source());
            notices.push(InputNotice::EmptyResume);
        }
        if job.is_blank() {
            warn!("Job description {} has no text", job.source());
            notices.push(InputNotice::EmptyJobDescription);
        }

        let similarity = if notices.is_empty() {
            self.semantic_similarity(resume.content(), job.content())?
        } else {
            SimilarityScore { score: 0.0, raw_score: 0.0, embedding_dim: 0 }
        };
        debug!("Semantic similarity {:.4} (raw {:.4})", similarity.score, similarity.raw_score);

        let resume_skills = self.skill_extractor.extract(resume.content());
        let jd_skills = self.skill_extractor.extract(job.content());
        debug!("Found {} resume skills and {} job skills", resume_skills.len(), jd_skills.len());

        let resume_keywords: KeywordSet = self.normalizer.normalize(resume.content());
        let jd_keywords: KeywordSet = self.normalizer.normalize(job.content());

        let metrics = aggregate(
            similarity.score,
            &resume_skills,
            &jd_skills,
            &resume_keywords,
            &jd_keywords,
            &self.catalog,
        );

        info!(
            "Analysis complete: grade {}, ATS {:.1}%, {} missing skills",
            metrics.grade,
            metrics.ats.score,
            metrics.missing_skills.len()
        );

        Ok(AnalysisReport {
            similarity,
            resume_skills,
            jd_skills,
            metrics,
            notices,
            resume_word_count: resume.word_count(),
            jd_word_count: job.word_count(),
        })
    }

    fn semantic_similarity(&self, resume_text: &str, job_text: &str) -> Result<SimilarityScore> {
        let resume_embedding = self.encoder.encode(resume_text)?;
        let job_embedding = self.encoder.encode(job_text)?;
        cosine_similarity(&resume_embedding, &job_embedding)
    }
}
