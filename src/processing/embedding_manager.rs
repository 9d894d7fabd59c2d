//! Embedding model management for downloading and locating Model2Vec models

use crate::config::AvailableModel;
use crate::error::{Result, ResumeAnalyzerError};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

const REQUIRED_FILES: [&str; 3] = ["tokenizer.json", "model.safetensors", "config.json"];
const OPTIONAL_FILES: [&str; 1] = ["README.md"];

/// Manager for embedding models - handles download, detection and resolution
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: Vec<AvailableModel>,
    downloaded_models: HashSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf, available_models: Vec<AvailableModel>) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                ResumeAnalyzerError::ModelError(format!("Failed to create models directory: {}", e))
            })?;
        }

        let mut manager = Self {
            models_dir,
            available_models,
            downloaded_models: HashSet::new(),
        };

        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            ResumeAnalyzerError::ModelError(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() && Self::is_valid_model_directory(&entry.path()).await {
                self.downloaded_models.insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    async fn is_valid_model_directory(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Download a model from the Hugging Face Hub into `<models_dir>/<id>`
    pub async fn download_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let model_info = self.get_model_info(model_id)
            .cloned()
            .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(model_id.to_string()))?;

        let model_dir = self.models_dir.join(&model_info.id);

        if self.downloaded_models.contains(&model_info.id) {
            return Ok(model_dir);
        }

        info!("Downloading embedding model {} ({} MB) from {}", model_info.name, model_info.size_mb, model_info.repo_id);

        fs::create_dir_all(&model_dir).await?;

        let api = Api::new().map_err(|e| {
            ResumeAnalyzerError::ModelError(format!("Failed to initialize HF API: {}", e))
        })?;
        let repo = api.model(model_info.repo_id.clone());

        for file in REQUIRED_FILES.iter().chain(OPTIONAL_FILES.iter()) {
            match repo.get(file).await {
                Ok(cached_path) => {
                    fs::copy(&cached_path, model_dir.join(file)).await.map_err(|e| {
                        ResumeAnalyzerError::ModelError(format!("Failed to copy {}: {}", file, e))
                    })?;
                    info!("Downloaded {}", file);
                }
                Err(e) if OPTIONAL_FILES.contains(file) => {
                    warn!("Optional file {} not found: {}", file, e);
                }
                Err(e) => {
                    return Err(ResumeAnalyzerError::ModelError(format!(
                        "Failed to download required file {}: {}", file, e
                    )));
                }
            }
        }

        self.downloaded_models.insert(model_info.id.clone());
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.downloaded_models.contains(model_id) {
            Some(self.models_dir.join(model_id))
        } else {
            None
        }
    }

    /// Return the local path of a model, downloading it first if needed
    pub async fn ensure_model_available(&mut self, model_id: &str) -> Result<PathBuf> {
        if let Some(path) = self.get_model_path(model_id) {
            return Ok(path);
        }
        self.download_model(model_id).await
    }

    pub async fn remove_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let model_dir = self.get_model_path(model_id)
            .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(format!("{} is not downloaded", model_id)))?;

        fs::remove_dir_all(&model_dir).await.map_err(|e| {
            ResumeAnalyzerError::ModelError(format!("Failed to remove model: {}", e))
        })?;
        self.downloaded_models.remove(model_id);

        Ok(model_dir)
    }

    pub fn list_available_models(&self) -> &[AvailableModel] {
        &self.available_models
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        let mut downloaded: Vec<String> = self.downloaded_models.iter().cloned().collect();
        downloaded.sort();
        downloaded
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&AvailableModel> {
        self.available_models.iter().find(|m| m.id == model_id)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    /// Resolve a model id from an id, a repo id or a display name
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        let input_lower = input.to_lowercase();

        self.available_models
            .iter()
            .find(|m| m.id == input)
            .or_else(|| self.available_models.iter().find(|m| m.repo_id == input))
            .or_else(|| self.available_models.iter().find(|m| m.name.to_lowercase() == input_lower))
            .map(|m| m.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    async fn manager(dir: &TempDir) -> EmbeddingModelManager {
        let models = Config::default().models.available_models;
        EmbeddingModelManager::new(dir.path().to_path_buf(), models).await.unwrap()
    }

    #[tokio::test]
    async fn test_manager_creation() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir).await;

        assert_eq!(manager.list_available_models().len(), 3);
        assert!(manager.list_downloaded_models().is_empty());
    }

    #[tokio::test]
    async fn test_detects_downloaded_model() {
        let temp_dir = TempDir::new().unwrap();
        let model_dir = temp_dir.path().join("potion-base-8M");
        std::fs::create_dir_all(&model_dir).unwrap();
        for file in REQUIRED_FILES {
            std::fs::write(model_dir.join(file), b"{}").unwrap();
        }
        std::fs::create_dir_all(temp_dir.path().join("incomplete")).unwrap();

        let mut manager = manager(&temp_dir).await;
        assert!(manager.is_model_downloaded("potion-base-8M"));
        assert!(!manager.is_model_downloaded("incomplete"));
        assert_eq!(manager.ensure_model_available("potion-base-8M").await.unwrap(), model_dir);

        let removed = manager.remove_model("potion-base-8M").await.unwrap();
        assert_eq!(removed, model_dir);
        assert!(!model_dir.exists());
        assert!(!manager.is_model_downloaded("potion-base-8M"));
    }

    #[tokio::test]
    async fn test_resolve_model_id() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager(&temp_dir).await;

        assert_eq!(manager.resolve_model_id("potion-base-8M"), Some("potion-base-8M".to_string()));
        assert_eq!(manager.resolve_model_id("minishlab/M2V_base_output"), Some("m2v-base".to_string()));
        assert_eq!(manager.resolve_model_id("model2vec large"), Some("m2v-large".to_string()));
        assert_eq!(manager.resolve_model_id("unknown"), None);
    }

    #[tokio::test]
    async fn test_unknown_model_download() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = manager(&temp_dir).await;

        let result = manager.download_model("not-a-model").await;
        assert!(matches!(result, Err(ResumeAnalyzerError::ModelNotFound(_))));
    }
}
