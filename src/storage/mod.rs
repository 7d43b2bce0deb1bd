//! Persistence for saved job alerts

pub mod json_file;
pub mod memory;

use crate::error::Result;
use crate::processing::alerts::JobAlert;

pub use json_file::JsonFileAlertStore;
pub use memory::MemoryAlertStore;

/// Per-user alert repository. `put` replaces the user's whole alert list.
pub trait AlertStore {
    fn get(&self, user_id: &str) -> Result<Vec<JobAlert>>;
    fn put(&self, user_id: &str, alerts: Vec<JobAlert>) -> Result<()>;
}

impl<S: AlertStore + ?Sized> AlertStore for &S {
    fn get(&self, user_id: &str) -> Result<Vec<JobAlert>> {
        (**self).get(user_id)
    }

    fn put(&self, user_id: &str, alerts: Vec<JobAlert>) -> Result<()> {
        (**self).put(user_id, alerts)
    }
}
