//! Durable dashboard state. The whole store (employee collection plus filter
//! state) is serialized as one JSON document behind a small backend trait so
//! tests can swap the file for an in-memory slot.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use entity::{Employee, QueryFilters};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("state file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state document error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// The persisted document. No version field; an absent document loads as the
/// default empty state. The transient page cursor is deliberately not part of
/// this layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub filters: QueryFilters,
}

pub trait StateBackend: Send + Sync {
    /// Returns `None` when no state has been saved yet.
    fn load(&self) -> StorageResult<Option<PersistedState>>;
    fn save(&self, state: &PersistedState) -> StorageResult<()>;
}

/// Environment-driven location of the state document.
#[derive(Clone, Debug)]
pub struct StorageSettings {
    path: PathBuf,
}

impl StorageSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        let path = std::env::var("STAFFBOARD_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("staffboard-state.json"));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backend(&self) -> JsonFileBackend {
        JsonFileBackend::new(self.path.clone())
    }
}

/// One JSON document on disk. Writes go through a sibling temp file and a
/// rename so a crash mid-save never truncates the previous state.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl StateBackend for JsonFileBackend {
    fn load(&self) -> StorageResult<Option<PersistedState>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, state: &PersistedState) -> StorageResult<()> {
        let raw = serde_json::to_string_pretty(state)?;
        let temp = self.temp_path();
        fs::write(&temp, raw)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// Mutex-guarded slot, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: Mutex<Option<PersistedState>>,
}

impl MemoryBackend {
    fn slot(&self) -> std::sync::MutexGuard<'_, Option<PersistedState>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self) -> StorageResult<Option<PersistedState>> {
        Ok(self.slot().clone())
    }

    fn save(&self, state: &PersistedState) -> StorageResult<()> {
        *self.slot() = Some(state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::Department;

    fn sample_state() -> PersistedState {
        PersistedState {
            employees: vec![Employee {
                id: 1,
                first_name: "Ananya".into(),
                last_name: "Patel".into(),
                email: "ananya.patel@company.in".into(),
                age: 31,
                department: Department::Finance,
                performance: 4.2,
                address: "Salt Lake City, Kolkata, West Bengal - 700091".into(),
                phone: "+91 9988776655".into(),
                bio: "Numbers person".into(),
                is_bookmarked: true,
            }],
            filters: QueryFilters {
                search: "ana".into(),
                departments: vec![Department::Finance],
                ratings: vec![4],
            },
        }
    }

    #[test]
    fn memory_backend_round_trips() {
        let backend = MemoryBackend::default();
        assert!(backend.load().unwrap().is_none());
        let state = sample_state();
        backend.save(&state).unwrap();
        assert_eq!(backend.load().unwrap(), Some(state));
    }

    #[test]
    fn file_backend_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("state.json"));
        assert!(backend.load().unwrap().is_none());
        let state = sample_state();
        backend.save(&state).unwrap();
        assert_eq!(backend.load().unwrap(), Some(state));
    }

    #[test]
    fn file_backend_overwrites_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("state.json"));
        backend.save(&sample_state()).unwrap();
        backend.save(&PersistedState::default()).unwrap();
        assert_eq!(backend.load().unwrap(), Some(PersistedState::default()));
    }

    #[test]
    fn missing_fields_load_as_defaults() {
        let state: PersistedState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, PersistedState::default());
    }
}
