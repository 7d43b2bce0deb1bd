//! Alert store backed by a single JSON document on disk
//!
//! The file holds one object mapping user id to that user's alert array.
//! Every write replaces the whole file, so two processes writing at once can
//! silently overwrite each other. Entries for other users are written back
//! exactly as they were read, even when they do not decode as alerts.

use crate::error::{JobMatcherError, Result};
use crate::processing::alerts::JobAlert;
use crate::storage::AlertStore;
use log::{debug, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

type AlertMap = BTreeMap<String, Value>;

#[derive(Debug, Clone)]
pub struct JsonFileAlertStore {
    path: PathBuf,
}

impl JsonFileAlertStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document. Missing or corrupt files read as empty.
    fn load(&self) -> Result<AlertMap> {
        if !self.path.exists() {
            debug!("Alert file {} does not exist yet", self.path.display());
            return Ok(AlertMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AlertMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!("Ignoring unreadable alert file {}: {}", self.path.display(), e);
                Ok(AlertMap::new())
            }
        }
    }

    fn save(&self, map: &AlertMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, content).map_err(|e| {
            JobMatcherError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl AlertStore for JsonFileAlertStore {
    fn get(&self, user_id: &str) -> Result<Vec<JobAlert>> {
        let Some(entry) = self.load()?.remove(user_id) else {
            return Ok(Vec::new());
        };

        match serde_json::from_value(entry) {
            Ok(alerts) => Ok(alerts),
            Err(e) => {
                warn!("Ignoring unreadable alerts for user {} in {}: {}", user_id, self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    fn put(&self, user_id: &str, alerts: Vec<JobAlert>) -> Result<()> {
        let mut map = self.load()?;
        map.insert(user_id.to_string(), serde_json::to_value(alerts)?);
        self.save(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::alerts::AlertCriteria;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileAlertStore::new(dir.path().join("alerts.json"));
        assert!(store.get("anyone").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_resets() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alerts.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileAlertStore::new(&path);
        assert!(store.get("u1").unwrap().is_empty());

        store.put("u1", vec![JobAlert::new(AlertCriteria::default())]).unwrap();
        assert_eq!(store.get("u1").unwrap().len(), 1);
    }

    #[test]
    fn test_users_are_kept_apart() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileAlertStore::new(dir.path().join("nested").join("alerts.json"));

        let alert = JobAlert::new(AlertCriteria {
            keywords: vec!["rust".to_string()],
            ..AlertCriteria::default()
        });
        store.put("u1", vec![alert.clone()]).unwrap();
        store.put("u2", Vec::new()).unwrap();

        assert_eq!(store.get("u1").unwrap(), vec![alert]);
        assert!(store.get("u2").unwrap().is_empty());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(doc["u1"][0]["keywords"].is_array());
        assert!(doc["u1"][0]["createdAt"].is_string());
    }

    #[test]
    fn test_reads_front_end_layout_with_text_salary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alerts.json");
        std::fs::write(
            &path,
            r#"{
                "u1": [{"id": "a1", "keywords": ["react"], "location": "Remote", "jobType": "",
                        "minSalary": "80000", "active": true, "createdAt": "2024-03-01T09:30:00Z"}],
                "u2": [{"id": "a2", "keywords": [], "location": "", "jobType": "Contract",
                        "minSalary": "", "active": false, "createdAt": "2024-03-02T10:00:00.000Z"}]
            }"#,
        )
        .unwrap();

        let store = JsonFileAlertStore::new(&path);
        let u1 = store.get("u1").unwrap();
        assert_eq!(u1.len(), 1);
        assert_eq!(u1[0].min_salary, Some(80000));
        let u2 = store.get("u2").unwrap();
        assert_eq!(u2.len(), 1);
        assert_eq!(u2[0].min_salary, None);
        assert!(!u2[0].active);

        store.put("u3", vec![JobAlert::new(AlertCriteria::default())]).unwrap();
        assert_eq!(store.get("u1").unwrap(), u1);
        assert_eq!(store.get("u2").unwrap(), u2);
        assert_eq!(store.get("u3").unwrap().len(), 1);
    }

    #[test]
    fn test_writing_one_user_keeps_undecodable_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alerts.json");
        std::fs::write(&path, r#"{"legacy": [{"id": 7, "shape": "unknown"}]}"#).unwrap();

        let store = JsonFileAlertStore::new(&path);
        assert!(store.get("legacy").unwrap().is_empty());

        store.put("u1", Vec::new()).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["legacy"][0]["shape"], "unknown");
        assert!(doc["u1"].as_array().unwrap().is_empty());
    }
}
