//! Text encoders and cosine similarity scoring

use crate::error::{Result, ResumeAnalyzerError};
use log::info;
use model2vec_rs::model::StaticModel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Turns a text into a fixed-length dense vector.
///
/// One encoder is loaded per process and shared read-only by every analysis
/// run, so implementations must be usable from several threads at once.
pub trait TextEncoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>>;

    fn model_name(&self) -> &str;
}

/// Model2Vec static embedding model
pub struct Model2VecEncoder {
    model: StaticModel,
    model_name: String,
}

impl Model2VecEncoder {
    pub fn load(model_path: &Path, model_name: impl Into<String>) -> Result<Self> {
        let start_time = Instant::now();

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        ).map_err(|e| ResumeAnalyzerError::Embedding(format!("Failed to load model: {}", e)))?;

        info!("Embedding model loaded from {} in {:.2?}", model_path.display(), start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.into(),
        })
    }
}

impl TextEncoder for Model2VecEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.model.encode_single(text))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityScore {
    /// Cosine similarity clamped into [0, 1]
    pub score: f32,
    /// Cosine similarity before clamping, in [-1, 1]
    pub raw_score: f32,
    pub embedding_dim: usize,
}

/// Cosine similarity between two embeddings.
///
/// Negative similarities are clamped to zero. Zero-length or zero-norm
/// vectors score zero; vectors of different lengths are rejected.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<SimilarityScore> {
    if a.len() != b.len() {
        return Err(ResumeAnalyzerError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    // accumulate in f64 so large components do not overflow to inf
    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();

    let cosine = dot_product / (norm_a * norm_b);
    let raw_score = if norm_a == 0.0 || norm_b == 0.0 || !cosine.is_finite() {
        0.0
    } else {
        cosine.clamp(-1.0, 1.0) as f32
    };

    Ok(SimilarityScore {
        score: raw_score.clamp(0.0, 1.0),
        raw_score,
        embedding_dim: a.len(),
    })
}
