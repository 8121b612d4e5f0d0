use async_trait::async_trait;
use pattern_core::model::{PatternId, StudiedSet, ViewState};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key under which the studied list is stored.
pub const STUDIED_PATTERNS_KEY: &str = "studiedPatterns";

/// Key under which one pattern's view state is stored.
#[must_use]
pub fn view_state_key(id: PatternId) -> String {
    format!("viewedSections_{id}")
}

/// Minimal string key-value persistence, the only thing the study trackers need
/// from a backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Per-pattern view state persistence.
#[async_trait]
pub trait ViewStateRepository: Send + Sync {
    /// Fetch the stored view state for a pattern.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed data, or other storage errors.
    async fn load_view_state(&self, id: PatternId) -> Result<Option<ViewState>, StorageError>;

    /// Persist the full view state for a pattern.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be stored.
    async fn save_view_state(&self, id: PatternId, state: &ViewState) -> Result<(), StorageError>;
}

/// Persistence for the global list of studied patterns.
#[async_trait]
pub trait StudiedPatternRepository: Send + Sync {
    /// Fetch the stored studied list.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed data, or other storage errors.
    async fn load_studied(&self) -> Result<Option<StudiedSet>, StorageError>;

    /// Replace the stored studied list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be stored.
    async fn save_studied(&self, studied: &StudiedSet) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and for running without a database.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed repositories on top of any `KeyValueStore`, encoding values as JSON.
#[derive(Clone)]
pub struct JsonRepository {
    store: Arc<dyn KeyValueStore>,
}

impl JsonRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Serialization(format!("{key}: {e}")))
    }

    async fn write<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(format!("{key}: {e}")))?;
        self.store.set(key, &raw).await
    }
}

#[async_trait]
impl ViewStateRepository for JsonRepository {
    async fn load_view_state(&self, id: PatternId) -> Result<Option<ViewState>, StorageError> {
        self.read(&view_state_key(id)).await
    }

    async fn save_view_state(&self, id: PatternId, state: &ViewState) -> Result<(), StorageError> {
        self.write(&view_state_key(id), state).await
    }
}

#[async_trait]
impl StudiedPatternRepository for JsonRepository {
    async fn load_studied(&self) -> Result<Option<StudiedSet>, StorageError> {
        self.read(STUDIED_PATTERNS_KEY).await
    }

    async fn save_studied(&self, studied: &StudiedSet) -> Result<(), StorageError> {
        self.write(STUDIED_PATTERNS_KEY, studied).await
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub view_states: Arc<dyn ViewStateRepository>,
    pub studied: Arc<dyn StudiedPatternRepository>,
}

impl Storage {
    /// Build typed repositories over an arbitrary key-value backend.
    #[must_use]
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        let repo = JsonRepository::new(store);
        let view_states: Arc<dyn ViewStateRepository> = Arc::new(repo.clone());
        let studied: Arc<dyn StudiedPatternRepository> = Arc::new(repo);
        Self {
            view_states,
            studied,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }
}
