use crate::error::{JobMatcherError, Result};
use crate::processing::alerts::JobAlert;
use crate::storage::AlertStore;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process alert store
#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    alerts: Mutex<HashMap<String, Vec<JobAlert>>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AlertStore for MemoryAlertStore {
    fn get(&self, user_id: &str) -> Result<Vec<JobAlert>> {
        let alerts = self
            .alerts
            .lock()
            .map_err(|e| JobMatcherError::Storage(format!("Alert store lock poisoned: {}", e)))?;
        Ok(alerts.get(user_id).cloned().unwrap_or_default())
    }

    fn put(&self, user_id: &str, alerts: Vec<JobAlert>) -> Result<()> {
        let mut store = self
            .alerts
            .lock()
            .map_err(|e| JobMatcherError::Storage(format!("Alert store lock poisoned: {}", e)))?;
        store.insert(user_id.to_string(), alerts);
        Ok(())
    }
}
