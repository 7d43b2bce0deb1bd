//! Report payloads produced by CLI commands

use crate::input::upload::{BatchValidation, UploadPurpose};
use crate::meeting::MeetingLink;
use crate::processing::alerts::{AlertMatch, JobAlert};
use crate::processing::match_scorer::MatchResult;
use crate::processing::recommender::JobRecommendation;
use crate::processing::skill_gap::SkillGapReport;
use crate::processing::types::Job;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobScore {
    pub job_id: String,
    pub title: String,
    pub company: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl JobScore {
    pub fn new(job: &Job, result: MatchResult) -> Self {
        Self {
            job_id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            result,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub purpose: UploadPurpose,
    #[serde(flatten)]
    pub validation: BatchValidation,
}

/// Anything a command can print
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum Report {
    Scores(Vec<JobScore>),
    Recommendations(Vec<JobRecommendation>),
    SkillGaps(SkillGapReport),
    Alerts(Vec<JobAlert>),
    AlertMatches(Vec<AlertMatch>),
    Uploads(UploadReport),
    Meeting(MeetingLink),
}

/// Score tier label shared by the formatters
pub fn score_label(score: u8) -> &'static str {
    match score {
        80..=100 => "Excellent",
        60..=79 => "Good",
        40..=59 => "Fair",
        _ => "Poor",
    }
}
