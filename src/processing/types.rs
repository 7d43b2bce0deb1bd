//! Core records shared by the scoring, ranking and alert modules

use serde::{Deserialize, Deserializer, Serialize};

/// A job seeker's profile as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub skills: Vec<String>,
    pub experience_level: String,
    pub location: String,
    pub expected_salary: String,
    pub preferred_job_type: String,
}

/// A job posting. Read-only from the matcher's perspective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    pub company: String,
    pub skills: Vec<String>,
    pub experience_level: String,
    pub location: String,
    pub salary: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub description: String,
}

impl UserProfile {
    /// Profile skills, lower-cased and trimmed, blanks removed
    pub fn normalized_skills(&self) -> Vec<String> {
        normalize_skills(&self.skills)
    }
}

impl Job {
    pub fn normalized_skills(&self) -> Vec<String> {
        normalize_skills(&self.skills)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JobId {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Job ids arrive as strings or numbers; both are kept as text
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<JobId>::deserialize(deserializer)? {
        Some(JobId::Text(id)) => id,
        Some(JobId::Integer(id)) => id.to_string(),
        Some(JobId::Float(id)) => id.to_string(),
        None => String::new(),
    })
}

fn normalize_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
