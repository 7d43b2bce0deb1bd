//! Aggregate skill demand across a job set and report what a profile lacks

use crate::processing::types::{Job, UserProfile};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const TOP_MISSING_SKILLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillPriority {
    High,
    Medium,
    Low,
}

impl fmt::Display for SkillPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillPriority::High => write!(f, "high"),
            SkillPriority::Medium => write!(f, "medium"),
            SkillPriority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingSkill {
    pub skill: String,
    pub demand_count: usize,
    /// Share of jobs asking for this skill, 0 to 100
    pub demand_percentage: u32,
    pub priority: SkillPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapReport {
    /// Number of distinct demanded skills the profile lists. Profile skills no
    /// job asks for are not counted, so this is not `skills.len()`.
    pub user_skill_count: usize,
    /// Distinct skills asked for across all jobs
    pub total_demanded_skills: usize,
    pub missing_skills: Vec<MissingSkill>,
    pub top_missing_skills: Vec<MissingSkill>,
    /// Percentage of demanded skills covered by the profile
    pub skill_coverage: u32,
}

/// Demand counts keyed by skill, iterated in order of first appearance
#[derive(Debug, Default)]
struct DemandTable {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl DemandTable {
    fn record(&mut self, skill: &str) {
        match self.counts.get_mut(skill) {
            Some(count) => *count += 1,
            None => {
                self.order.push(skill.to_string());
                self.counts.insert(skill.to_string(), 1);
            }
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|skill| (skill.as_str(), self.counts.get(skill).copied().unwrap_or_default()))
    }
}

pub fn analyze_skill_gaps(profile: &UserProfile, jobs: &[Job]) -> SkillGapReport {
    let user_skills: HashSet<String> = profile.normalized_skills().into_iter().collect();

    let mut demand = DemandTable::default();
    let mut missing_demand = DemandTable::default();

    for job in jobs {
        for skill in job.normalized_skills() {
            demand.record(&skill);
            if !user_skills.contains(&skill) {
                missing_demand.record(&skill);
            }
        }
    }

    let job_count = jobs.len();
    let mut missing_skills: Vec<MissingSkill> = missing_demand
        .iter()
        .map(|(skill, count)| MissingSkill {
            skill: skill.to_string(),
            demand_count: count,
            demand_percentage: percentage(count, job_count),
            priority: priority_for(count, job_count),
        })
        .collect();

    // stable: ties stay in first-appearance order
    missing_skills.sort_by(|a, b| b.demand_count.cmp(&a.demand_count));

    let total_demanded_skills = demand.len();
    let user_skill_count = demand
        .iter()
        .filter(|(skill, _)| user_skills.contains(*skill))
        .count();

    let top_missing_skills = missing_skills.iter().take(TOP_MISSING_SKILLS).cloned().collect();

    SkillGapReport {
        user_skill_count,
        total_demanded_skills,
        missing_skills,
        top_missing_skills,
        skill_coverage: percentage(user_skill_count, total_demanded_skills),
    }
}

fn priority_for(demand: usize, job_count: usize) -> SkillPriority {
    let demand = demand as f64;
    let job_count = job_count as f64;
    if demand >= job_count * 0.5 {
        SkillPriority::High
    } else if demand >= job_count * 0.25 {
        SkillPriority::Medium
    } else {
        SkillPriority::Low
    }
}

fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
