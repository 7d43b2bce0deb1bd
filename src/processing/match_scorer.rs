//! Weighted compatibility scoring between a profile and a single job

use crate::processing::salary::parse_salary;
use crate::processing::types::{Job, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered experience scale, most junior first
pub const EXPERIENCE_LEVELS: [&str; 6] = ["entry", "junior", "mid", "senior", "lead", "executive"];

/// Score given to a dimension that cannot be evaluated
const NEUTRAL: f64 = 50.0;

/// Per-dimension weights. The defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub salary: f64,
    pub job_type: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            experience: 0.25,
            location: 0.15,
            salary: 0.10,
            job_type: 0.10,
        }
    }
}

impl MatchWeights {
    pub fn total(&self) -> f64 {
        self.skills + self.experience + self.location + self.salary + self.job_type
    }
}

/// Weighted contribution of each dimension to the final score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub salary: f64,
    pub job_type: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.skills + self.experience + self.location + self.salary + self.job_type
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Overall score, 0 to 100
    pub score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// Scores profiles against jobs. Never fails: incomplete input degrades to
/// neutral dimension scores.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    weights: MatchWeights,
}

impl MatchScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, profile: &UserProfile, job: &Job) -> MatchResult {
        let user_skills: HashSet<String> = profile.normalized_skills().into_iter().collect();
        let job_skills = job.normalized_skills();

        let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = job_skills
            .iter()
            .cloned()
            .partition(|skill| user_skills.contains(skill));

        let skills = if job_skills.is_empty() {
            NEUTRAL
        } else {
            matched_skills.len() as f64 / job_skills.len() as f64 * 100.0
        };

        let breakdown = ScoreBreakdown {
            skills: skills * self.weights.skills,
            experience: experience_score(&profile.experience_level, &job.experience_level)
                * self.weights.experience,
            location: location_score(&profile.location, &job.location) * self.weights.location,
            salary: salary_score(&profile.expected_salary, &job.salary) * self.weights.salary,
            job_type: job_type_score(&profile.preferred_job_type, &job.job_type)
                * self.weights.job_type,
        };

        let score = breakdown.total().round().clamp(0.0, 100.0) as u8;

        MatchResult {
            score,
            matched_skills,
            missing_skills,
            breakdown,
        }
    }
}

/// Score a job with the default weights
pub fn calculate_match_score(profile: &UserProfile, job: &Job) -> MatchResult {
    MatchScorer::new().score(profile, job)
}

/// Position of a free-text experience level on the scale
pub fn experience_index(level: &str) -> Option<usize> {
    let level = level.to_lowercase();
    if level.trim().is_empty() {
        return None;
    }
    EXPERIENCE_LEVELS.iter().position(|known| level.contains(known))
}

fn experience_score(user_level: &str, job_level: &str) -> f64 {
    match (experience_index(user_level), experience_index(job_level)) {
        (Some(user), Some(job)) => {
            let diff = user.abs_diff(job) as f64;
            (1.0 - diff * 0.25).max(0.0) * 100.0
        }
        _ => NEUTRAL,
    }
}

fn location_score(user_location: &str, job_location: &str) -> f64 {
    let job_location = job_location.to_lowercase();
    if job_location.contains("remote") {
        return 100.0;
    }

    let city = user_location
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    if city.is_empty() {
        NEUTRAL
    } else if job_location.contains(&city) {
        100.0
    } else {
        30.0
    }
}

fn salary_score(expected: &str, offered: &str) -> f64 {
    match (parse_salary(expected), parse_salary(offered)) {
        (Some(expected), Some(offered)) => {
            let ratio = offered as f64 / expected as f64;
            if ratio >= 0.9 {
                100.0
            } else if ratio >= 0.75 {
                70.0
            } else {
                40.0
            }
        }
        _ => NEUTRAL,
    }
}

fn job_type_score(preferred: &str, offered: &str) -> f64 {
    let preferred = preferred.trim();
    if !preferred.is_empty() && preferred.eq_ignore_ascii_case(offered.trim()) {
        100.0
    } else {
        NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            skills: vec!["react".to_string(), "sql".to_string()],
            experience_level: "mid".to_string(),
            location: "Austin, TX".to_string(),
            expected_salary: "90000".to_string(),
            preferred_job_type: "full-time".to_string(),
        }
    }

    fn job() -> Job {
        Job {
            id: "1".to_string(),
            title: "Web Developer".to_string(),
            company: "Acme".to_string(),
            skills: vec!["react".to_string(), "node".to_string()],
            experience_level: "mid".to_string(),
            location: "Austin".to_string(),
            salary: "95000".to_string(),
            job_type: "full-time".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_reference_example_scores_80() {
        let result = calculate_match_score(&profile(), &job());

        assert_eq!(result.score, 80);
        assert_eq!(result.matched_skills, vec!["react"]);
        assert_eq!(result.missing_skills, vec!["node"]);
        assert!((result.breakdown.skills - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_job_skills_get_half_weight() {
        let mut job = job();
        job.skills.clear();
        let result = calculate_match_score(&profile(), &job);

        let half = MatchWeights::default().skills * 100.0 / 2.0;
        assert!((result.breakdown.skills - half).abs() < 1e-9);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_skill_matching_is_case_insensitive() {
        let mut profile = profile();
        profile.skills = vec!["React".to_string(), "NODE".to_string()];
        let result = calculate_match_score(&profile, &job());

        assert_eq!(result.matched_skills, vec!["react", "node"]);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_identical_experience_gets_full_credit() {
        for level in EXPERIENCE_LEVELS {
            let mut profile = profile();
            let mut job = job();
            profile.experience_level = level.to_string();
            job.experience_level = level.to_string();

            let result = calculate_match_score(&profile, &job);
            assert!((result.breakdown.experience - 25.0).abs() < 1e-9, "level {}", level);
        }
    }

    #[test]
    fn test_experience_distance_and_unknown_levels() {
        assert_eq!(experience_score("Entry level", "Mid-level"), 50.0);
        assert_eq!(experience_score("junior", "executive"), 0.0);
        assert_eq!(experience_score("Senior Engineer", "lead"), 75.0);
        assert_eq!(experience_score("", "senior"), NEUTRAL);
        assert_eq!(experience_score("principal", "senior"), NEUTRAL);
    }

    #[test]
    fn test_location_rules() {
        assert_eq!(location_score("Denver, CO", "Remote (US)"), 100.0);
        assert_eq!(location_score("Austin, TX", "Downtown Austin"), 100.0);
        assert_eq!(location_score("Austin, TX", "Seattle, WA"), 30.0);
        assert_eq!(location_score("", "Seattle, WA"), NEUTRAL);
    }

    #[test]
    fn test_salary_tiers() {
        assert_eq!(salary_score("100000", "$90,000"), 100.0);
        assert_eq!(salary_score("100000", "80000"), 70.0);
        assert_eq!(salary_score("100000", "60k"), 40.0);
        assert_eq!(salary_score("", "60000"), NEUTRAL);
        assert_eq!(salary_score("100000", "Negotiable"), NEUTRAL);
    }

    #[test]
    fn test_job_type_rules() {
        assert_eq!(job_type_score("Full-Time", "full-time"), 100.0);
        assert_eq!(job_type_score("contract", "full-time"), NEUTRAL);
        assert_eq!(job_type_score("", "full-time"), NEUTRAL);
    }

    #[test]
    fn test_empty_profile_never_fails() {
        let result = calculate_match_score(&UserProfile::default(), &Job::default());
        // every dimension neutral
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_custom_weights() {
        let scorer = MatchScorer::with_weights(MatchWeights {
            skills: 1.0,
            experience: 0.0,
            location: 0.0,
            salary: 0.0,
            job_type: 0.0,
        });
        assert_eq!(scorer.score(&profile(), &job()).score, 50);
    }
}
