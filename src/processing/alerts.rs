//! Saved job alerts: matching against postings and the alert lifecycle

use crate::error::{JobMatcherError, Result};
use crate::processing::salary::{deserialize_salary_floor, parse_salary};
use crate::processing::types::Job;
use crate::storage::AlertStore;
use aho_corasick::AhoCorasick;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAlert {
    pub id: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default, deserialize_with = "deserialize_salary_floor")]
    pub min_salary: Option<u64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// The user-supplied part of an alert
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertCriteria {
    pub keywords: Vec<String>,
    pub location: String,
    pub job_type: String,
    #[serde(deserialize_with = "deserialize_salary_floor")]
    pub min_salary: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertMatch {
    pub alert: JobAlert,
    pub job: Job,
}

impl JobAlert {
    pub fn new(criteria: AlertCriteria) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            keywords: criteria.keywords,
            location: criteria.location,
            job_type: criteria.job_type,
            min_salary: criteria.min_salary,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// True when the alert sets no criteria and therefore matches every job
    pub fn is_unrestricted(&self) -> bool {
        self.search_keywords().is_empty()
            && self.location.trim().is_empty()
            && self.job_type.trim().is_empty()
            && self.min_salary.is_none()
    }

    fn search_keywords(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }

    fn matcher(&self) -> Option<AhoCorasick> {
        let keywords = self.search_keywords();
        if keywords.is_empty() {
            return None;
        }
        match AhoCorasick::new(&keywords) {
            Ok(matcher) => Some(matcher),
            Err(e) => {
                warn!("Failed to build keyword matcher for alert {}: {}", self.id, e);
                None
            }
        }
    }

    /// Check a single job against every criterion this alert sets
    pub fn matches(&self, job: &Job) -> bool {
        self.matches_with(self.matcher().as_ref(), job)
    }

    fn matches_with(&self, matcher: Option<&AhoCorasick>, job: &Job) -> bool {
        if let Some(matcher) = matcher {
            let haystack = format!("{} {} {}", job.title, job.description, job.company).to_lowercase();
            if !matcher.is_match(&haystack) {
                return false;
            }
        }

        let location = self.location.trim().to_lowercase();
        if !location.is_empty() && !job.location.to_lowercase().contains(&location) {
            return false;
        }

        let job_type = self.job_type.trim();
        if !job_type.is_empty() && !job_type.eq_ignore_ascii_case(job.job_type.trim()) {
            return false;
        }

        if let Some(min_salary) = self.min_salary {
            match parse_salary(&job.salary) {
                Some(salary) if salary >= min_salary => {}
                _ => return false,
            }
        }

        true
    }
}

/// Pair every active alert with every job it matches. A job matched by
/// several alerts appears once per alert.
pub fn match_alerts(alerts: &[JobAlert], jobs: &[Job]) -> Vec<AlertMatch> {
    let mut matches = Vec::new();

    for alert in alerts.iter().filter(|a| a.active) {
        let matcher = alert.matcher();
        for job in jobs {
            if alert.matches_with(matcher.as_ref(), job) {
                matches.push(AlertMatch {
                    alert: alert.clone(),
                    job: job.clone(),
                });
            }
        }
    }

    matches
}

/// Alert lifecycle on top of an [`AlertStore`]. Every mutation rewrites the
/// user's whole alert list.
pub struct AlertService<S: AlertStore> {
    store: S,
}

impl<S: AlertStore> AlertService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list_alerts(&self, user_id: &str) -> Result<Vec<JobAlert>> {
        self.store.get(user_id)
    }

    pub fn active_alerts(&self, user_id: &str) -> Result<Vec<JobAlert>> {
        Ok(self
            .store
            .get(user_id)?
            .into_iter()
            .filter(|a| a.active)
            .collect())
    }

    pub fn create_alert(&self, user_id: &str, criteria: AlertCriteria) -> Result<JobAlert> {
        let alert = JobAlert::new(criteria);

        let mut alerts = self.store.get(user_id)?;
        alerts.push(alert.clone());
        self.store.put(user_id, alerts)?;

        info!("Created alert {} for user {}", alert.id, user_id);
        Ok(alert)
    }

    pub fn delete_alert(&self, user_id: &str, alert_id: &str) -> Result<()> {
        let mut alerts = self.store.get(user_id)?;
        let before = alerts.len();
        alerts.retain(|a| a.id != alert_id);

        if alerts.len() == before {
            return Err(JobMatcherError::AlertNotFound(alert_id.to_string()));
        }

        self.store.put(user_id, alerts)?;
        info!("Deleted alert {} for user {}", alert_id, user_id);
        Ok(())
    }

    /// Flip an alert between active and paused, returning the new state
    pub fn toggle_alert(&self, user_id: &str, alert_id: &str) -> Result<bool> {
        let mut alerts = self.store.get(user_id)?;
        let alert = alerts
            .iter_mut()
            .find(|a| a.id == alert_id)
            .ok_or_else(|| JobMatcherError::AlertNotFound(alert_id.to_string()))?;

        alert.active = !alert.active;
        let active = alert.active;

        self.store.put(user_id, alerts)?;
        debug!("Alert {} for user {} is now {}", alert_id, user_id, if active { "active" } else { "paused" });
        Ok(active)
    }

    pub fn check_alerts(&self, user_id: &str, jobs: &[Job]) -> Result<Vec<AlertMatch>> {
        let alerts = self.active_alerts(user_id)?;
        Ok(match_alerts(&alerts, jobs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryAlertStore;

    fn job(id: &str, title: &str, location: &str, job_type: &str, salary: &str) -> Job {
        Job {
            id: id.to_string(),
            title: title.to_string(),
            company: "Initech".to_string(),
            description: "Build internal tools".to_string(),
            location: location.to_string(),
            job_type: job_type.to_string(),
            salary: salary.to_string(),
            ..Job::default()
        }
    }

    fn jobs() -> Vec<Job> {
        vec![
            job("1", "Rust Engineer", "Berlin, DE", "Full-time", "$110,000"),
            job("2", "Data Analyst", "Remote", "Contract", "70000"),
            job("3", "Frontend Developer", "Austin, TX", "full-time", "Competitive"),
        ]
    }

    fn alert(criteria: AlertCriteria) -> JobAlert {
        JobAlert::new(criteria)
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let alert = alert(AlertCriteria::default());
        assert!(alert.is_unrestricted());

        let matches = match_alerts(&[alert], &jobs());
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_keywords_search_title_description_company() {
        let by_title = alert(AlertCriteria {
            keywords: vec!["RUST".to_string(), "golang".to_string()],
            ..AlertCriteria::default()
        });
        let by_company = alert(AlertCriteria {
            keywords: vec!["initech".to_string()],
            ..AlertCriteria::default()
        });

        assert_eq!(match_alerts(&[by_title], &jobs()).len(), 1);
        assert_eq!(match_alerts(&[by_company], &jobs()).len(), 3);
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let alert = alert(AlertCriteria {
            keywords: vec!["developer".to_string(), "engineer".to_string()],
            location: "berlin".to_string(),
            job_type: "FULL-TIME".to_string(),
            min_salary: Some(100_000),
        });

        let matches = match_alerts(&[alert], &jobs());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].job.id, "1");
    }

    #[test]
    fn test_unparsable_salary_fails_floor() {
        let alert = alert(AlertCriteria {
            min_salary: Some(1),
            ..AlertCriteria::default()
        });
        let ids: Vec<String> = match_alerts(&[alert], &jobs()).into_iter().map(|m| m.job.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_inactive_alerts_are_skipped_and_duplicates_kept() {
        let mut paused = alert(AlertCriteria::default());
        paused.active = false;
        let a = alert(AlertCriteria::default());
        let b = alert(AlertCriteria {
            location: "remote".to_string(),
            ..AlertCriteria::default()
        });

        let matches = match_alerts(&[paused, a, b], &jobs());
        assert_eq!(matches.len(), 4);
        assert_eq!(matches.iter().filter(|m| m.job.id == "2").count(), 2);
    }

    #[test]
    fn test_create_then_delete_restores_list() {
        let service = AlertService::new(MemoryAlertStore::new());
        service.create_alert("u1", AlertCriteria::default()).unwrap();
        let before = service.list_alerts("u1").unwrap();

        let created = service
            .create_alert("u1", AlertCriteria { location: "Paris".to_string(), ..AlertCriteria::default() })
            .unwrap();
        assert_eq!(service.list_alerts("u1").unwrap().len(), 2);

        service.delete_alert("u1", &created.id).unwrap();
        assert_eq!(service.list_alerts("u1").unwrap(), before);
    }

    #[test]
    fn test_toggle_and_missing_alert() {
        let service = AlertService::new(MemoryAlertStore::new());
        let created = service.create_alert("u1", AlertCriteria::default()).unwrap();
        assert!(created.active);

        assert!(!service.toggle_alert("u1", &created.id).unwrap());
        assert!(service.active_alerts("u1").unwrap().is_empty());
        assert!(service.check_alerts("u1", &jobs()).unwrap().is_empty());

        assert!(service.toggle_alert("u1", &created.id).unwrap());
        assert_eq!(service.check_alerts("u1", &jobs()).unwrap().len(), 3);

        assert!(matches!(
            service.delete_alert("u1", "nope"),
            Err(JobMatcherError::AlertNotFound(_))
        ));
        assert!(matches!(
            service.toggle_alert("u2", &created.id),
            Err(JobMatcherError::AlertNotFound(_))
        ));
    }
}
