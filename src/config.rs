//! Configuration management for the job matcher

use crate::error::{JobMatcherError, Result};
use crate::processing::match_scorer::MatchWeights;
use crate::processing::recommender::{DEFAULT_LIMIT, MIN_RECOMMENDATION_SCORE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
    pub meeting: MeetingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub min_recommendation_score: u8,
    pub recommendation_limit: usize,
    pub weights: MatchWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub alerts_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingConfig {
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let alerts_path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("alerts.json");

        Self {
            scoring: ScoringConfig {
                min_recommendation_score: MIN_RECOMMENDATION_SCORE,
                recommendation_limit: DEFAULT_LIMIT,
                weights: MatchWeights::default(),
            },
            storage: StorageConfig { alerts_path },
            meeting: MeetingConfig { delay_ms: 800 },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| JobMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Overwrite the file at `config_path` with defaults
    pub fn reset(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.scoring.weights;
        if [w.skills, w.experience, w.location, w.salary, w.job_type]
            .iter()
            .any(|weight| *weight < 0.0)
        {
            return Err(JobMatcherError::Configuration(
                "Scoring weights must not be negative".to_string(),
            ));
        }

        if (w.total() - 1.0).abs() > 1e-6 {
            return Err(JobMatcherError::Configuration(format!(
                "Scoring weights must sum to 1.0 (got {:.3})",
                w.total()
            )));
        }

        if self.scoring.min_recommendation_score > 100 {
            return Err(JobMatcherError::Configuration(
                "min_recommendation_score must be between 0 and 100".to_string(),
            ));
        }

        Ok(())
    }

    pub fn meeting_delay(&self) -> Duration {
        Duration::from_millis(self.meeting.delay_ms)
    }
}
