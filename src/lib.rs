//! Job matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod meeting;
pub mod output;
pub mod processing;
pub mod storage;

pub use config::Config;
pub use error::{JobMatcherError, Result};
pub use processing::alerts::{match_alerts, AlertCriteria, AlertMatch, AlertService, JobAlert};
pub use processing::match_scorer::{calculate_match_score, MatchResult, MatchScorer, MatchWeights};
pub use processing::recommender::{recommend_jobs, JobRecommendation, Recommender};
pub use processing::skill_gap::{analyze_skill_gaps, SkillGapReport};
pub use processing::types::{Job, UserProfile};
pub use storage::{AlertStore, JsonFileAlertStore, MemoryAlertStore};
