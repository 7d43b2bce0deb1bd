//! Input manager for loading profiles and job collections from disk

use crate::error::{JobMatcherError, Result};
use crate::input::file_detector::FileType;
use crate::processing::types::{Job, UserProfile};
use log::info;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// A job file is either a bare array or a table with a `jobs` key
#[derive(Deserialize)]
#[serde(untagged)]
enum JobFile {
    List(Vec<Job>),
    Table { jobs: Vec<Job> },
}

impl JobFile {
    fn into_jobs(self) -> Vec<Job> {
        match self {
            JobFile::List(jobs) | JobFile::Table { jobs } => jobs,
        }
    }
}

pub struct InputManager {
    cache: HashMap<String, String>,
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
        }
    }

    pub async fn load_profile(&mut self, path: &Path) -> Result<UserProfile> {
        info!("Loading profile from: {}", path.display());
        self.load(path).await
    }

    pub async fn load_jobs(&mut self, path: &Path) -> Result<Vec<Job>> {
        info!("Loading jobs from: {}", path.display());
        let file: JobFile = self.load(path).await?;
        Ok(file.into_jobs())
    }

    async fn load<T: DeserializeOwned>(&mut self, path: &Path) -> Result<T> {
        let file_type = self.detect_file_type(path)?;
        let text = self.read_text(path).await?;

        match file_type {
            FileType::Json => Ok(serde_json::from_str(&text)?),
            FileType::Toml => Ok(toml::from_str(&text)?),
            FileType::Unknown => Err(JobMatcherError::UnsupportedFormat(format!(
                "Unsupported file type for: {} (expected .json or .toml)",
                path.display()
            ))),
        }
    }

    async fn read_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached) = self.cache.get(&path_str) {
            info!("Using cached contents for: {}", path.display());
            return Ok(cached.clone());
        }

        if !path.exists() {
            return Err(JobMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = fs::read_to_string(path).await?;

        self.cache.insert(path_str, text.clone());
        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                JobMatcherError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
