//! Ranked job recommendations built on the match scorer

use crate::processing::match_scorer::MatchScorer;
use crate::processing::types::{Job, UserProfile};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 5;
pub const MIN_RECOMMENDATION_SCORE: u8 = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecommendation {
    pub job: Job,
    pub match_score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub reason: String,
}

pub struct Recommender {
    scorer: MatchScorer,
    min_score: u8,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new(MatchScorer::new())
    }
}

impl Recommender {
    pub fn new(scorer: MatchScorer) -> Self {
        Self {
            scorer,
            min_score: MIN_RECOMMENDATION_SCORE,
        }
    }

    pub fn with_min_score(mut self, min_score: u8) -> Self {
        self.min_score = min_score;
        self
    }

    /// Score every job, drop weak matches and return the best `limit`,
    /// highest score first. Equal scores keep their input order.
    pub fn recommend(&self, profile: &UserProfile, jobs: &[Job], limit: usize) -> Vec<JobRecommendation> {
        let mut recommendations: Vec<JobRecommendation> = jobs
            .iter()
            .map(|job| {
                let result = self.scorer.score(profile, job);
                let reason = recommendation_reason(result.score, &result.matched_skills, &result.missing_skills);
                JobRecommendation {
                    job: job.clone(),
                    match_score: result.score,
                    matched_skills: result.matched_skills,
                    missing_skills: result.missing_skills,
                    reason,
                }
            })
            .filter(|rec| rec.match_score >= self.min_score)
            .collect();

        // sort_by is stable
        recommendations.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        recommendations.truncate(limit);
        recommendations
    }
}

/// Recommend with the default scorer and threshold
pub fn recommend_jobs(profile: &UserProfile, jobs: &[Job], limit: Option<usize>) -> Vec<JobRecommendation> {
    Recommender::default().recommend(profile, jobs, limit.unwrap_or(DEFAULT_LIMIT))
}

/// Short human-readable explanation for a score tier
pub fn recommendation_reason(score: u8, matched: &[String], missing: &[String]) -> String {
    if score >= 80 {
        format!("Excellent match! You have {} of the required skills.", matched.len())
    } else if score >= 60 {
        match join_first_two(matched) {
            Some(skills) => format!("Good fit for your {} skills.", skills),
            None => "Good fit for your experience and preferences.".to_string(),
        }
    } else {
        match join_first_two(missing) {
            Some(skills) => format!("Growth opportunity to build {} skills.", skills),
            None => "Growth opportunity to stretch into a new role.".to_string(),
        }
    }
}

fn join_first_two(skills: &[String]) -> Option<String> {
    match skills {
        [] => None,
        [only] => Some(only.clone()),
        [first, second, ..] => Some(format!("{} and {}", first, second)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::match_scorer::calculate_match_score;

    fn profile() -> UserProfile {
        UserProfile {
            skills: vec!["rust".to_string(), "sql".to_string(), "docker".to_string()],
            experience_level: "senior".to_string(),
            location: "Berlin, DE".to_string(),
            expected_salary: "100000".to_string(),
            preferred_job_type: "full-time".to_string(),
        }
    }

    fn job(id: &str, skills: &[&str], level: &str, location: &str, salary: &str) -> Job {
        Job {
            id: id.to_string(),
            title: format!("Job {}", id),
            company: "Acme".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_level: level.to_string(),
            location: location.to_string(),
            salary: salary.to_string(),
            job_type: "full-time".to_string(),
            description: String::new(),
        }
    }

    fn jobs() -> Vec<Job> {
        vec![
            job("weak", &["cobol", "fortran"], "entry", "Tokyo", "30000"),
            job("good", &["rust", "go"], "senior", "Berlin", "95000"),
            job("best", &["rust", "sql", "docker"], "senior", "Remote", "120000"),
            job("tie", &["rust", "go"], "senior", "Berlin", "95000"),
        ]
    }

    #[test]
    fn test_filters_and_sorts() {
        let recs = recommend_jobs(&profile(), &jobs(), None);

        assert!(recs.iter().all(|r| r.match_score >= MIN_RECOMMENDATION_SCORE));
        assert!(recs.windows(2).all(|w| w[0].match_score >= w[1].match_score));
        assert!(recs.iter().all(|r| r.job.id != "weak"));
        assert_eq!(recs[0].job.id, "best");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let at_threshold = job("forty", &["cobol"], "lead", "Tokyo", "80000");
        let below = job(
            "thirty-nine",
            &["rust", "a", "b", "c", "d", "e", "f", "g"],
            "junior",
            "Tokyo",
            "80000",
        );
        assert_eq!(calculate_match_score(&profile(), &at_threshold).score, 40);
        assert_eq!(calculate_match_score(&profile(), &below).score, 39);

        let recs = recommend_jobs(&profile(), &[below, at_threshold], None);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].job.id, "forty");
        assert_eq!(recs[0].match_score, 40);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let recs = recommend_jobs(&profile(), &jobs(), None);
        let ids: Vec<&str> = recs.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(ids, vec!["best", "good", "tie"]);
    }

    #[test]
    fn test_limit_truncates() {
        let recs = recommend_jobs(&profile(), &jobs(), Some(1));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].job.id, "best");
    }

    #[test]
    fn test_reason_tiers() {
        let matched = vec!["rust".to_string(), "sql".to_string(), "docker".to_string()];
        let missing = vec!["go".to_string()];

        assert_eq!(
            recommendation_reason(85, &matched, &missing),
            "Excellent match! You have 3 of the required skills."
        );
        assert_eq!(
            recommendation_reason(65, &matched, &missing),
            "Good fit for your rust and sql skills."
        );
        assert_eq!(
            recommendation_reason(45, &matched, &missing),
            "Growth opportunity to build go skills."
        );
        assert_eq!(
            recommendation_reason(45, &matched, &[]),
            "Growth opportunity to stretch into a new role."
        );
    }

    #[test]
    fn test_reason_attached_to_recommendation() {
        let recs = recommend_jobs(&profile(), &jobs(), None);
        assert_eq!(recs[0].reason, "Excellent match! You have 3 of the required skills.");
    }
}
