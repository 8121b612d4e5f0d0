use std::sync::Arc;

use pattern_core::model::{Pattern, PatternId, StudiedSet};
use storage::repository::StudiedPatternRepository;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Process-wide record of the patterns the user has completed.
///
/// Construct once at startup with [`StudiedPatternRegistry::load`] and share it
/// (behind an `Arc`) with every consumer. Storage failures never surface from
/// here: a failed load starts empty and a failed save leaves the in-memory list
/// authoritative for the rest of the session.
pub struct StudiedPatternRegistry {
    repo: Arc<dyn StudiedPatternRepository>,
    studied: Mutex<StudiedSet>,
}

impl StudiedPatternRegistry {
    /// Read the persisted studied list.
    ///
    /// A missing or unreadable list yields an empty registry.
    pub async fn load(repo: Arc<dyn StudiedPatternRepository>) -> Self {
        let studied = match repo.load_studied().await {
            Ok(Some(studied)) => studied,
            Ok(None) => StudiedSet::new(),
            Err(err) => {
                warn!(error = %err, "failed to load studied patterns, starting empty");
                StudiedSet::new()
            }
        };
        debug!(count = studied.len(), "studied patterns loaded");

        Self {
            repo,
            studied: Mutex::new(studied),
        }
    }

    /// Record a completed pattern.
    ///
    /// No-op (and no write) if the id is already present; the first stored
    /// snapshot is kept. Calls are serialized, so concurrent completions of the
    /// same pattern cannot produce duplicates.
    ///
    /// Returns `true` if the pattern was newly added.
    pub async fn add_studied_pattern(&self, pattern: &Pattern) -> bool {
        let mut studied = self.studied.lock().await;
        if !studied.insert(pattern.clone()) {
            debug!(pattern_id = %pattern.id(), "pattern already studied");
            return false;
        }

        // The lock is held across the write so persisted lists land in order.
        if let Err(err) = self.repo.save_studied(&studied).await {
            warn!(
                pattern_id = %pattern.id(),
                error = %err,
                "failed to persist studied patterns, keeping in memory only"
            );
        }
        info!(pattern_id = %pattern.id(), title = pattern.title(), "pattern studied");
        true
    }

    /// Studied patterns in completion order.
    pub async fn studied_patterns(&self) -> Vec<Pattern> {
        self.studied.lock().await.as_slice().to_vec()
    }

    pub async fn is_studied(&self, id: PatternId) -> bool {
        self.studied.lock().await.contains(id)
    }

    pub async fn len(&self) -> usize {
        self.studied.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.studied.lock().await.is_empty()
    }
}
