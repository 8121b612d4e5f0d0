use std::sync::Arc;

use pattern_core::Catalogue;
use pattern_core::model::PatternId;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::progress::ProgressService;
use crate::registry::StudiedPatternRegistry;
use crate::view_tracker::ViewCompletionTracker;

/// Assembles app-facing services around one storage backend.
///
/// This is the composition root: build it once at startup and hand clones to
/// whatever needs study state.
#[derive(Clone)]
pub struct AppServices {
    storage: Storage,
    catalogue: Arc<Catalogue>,
    registry: Arc<StudiedPatternRegistry>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the built-in catalogue.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Sqlite` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(storage, Catalogue::builtin()).await)
    }

    /// Services that keep everything in memory.
    pub async fn in_memory() -> Self {
        Self::from_storage(Storage::in_memory(), Catalogue::builtin()).await
    }

    /// Load the studied registry from `storage` and wire up the services.
    pub async fn from_storage(storage: Storage, catalogue: Catalogue) -> Self {
        let catalogue = Arc::new(catalogue);
        let registry = Arc::new(StudiedPatternRegistry::load(Arc::clone(&storage.studied)).await);
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&catalogue),
            Arc::clone(&registry),
        ));

        Self {
            storage,
            catalogue,
            registry,
            progress,
        }
    }

    #[must_use]
    pub fn catalogue(&self) -> Arc<Catalogue> {
        Arc::clone(&self.catalogue)
    }

    #[must_use]
    pub fn registry(&self) -> Arc<StudiedPatternRegistry> {
        Arc::clone(&self.registry)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    /// Open the detail view tracker for a catalogue pattern.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::UnknownPattern` if the id is not in the catalogue.
    pub async fn open_pattern(
        &self,
        id: PatternId,
    ) -> Result<ViewCompletionTracker, AppServicesError> {
        let pattern = self
            .catalogue
            .get(id)
            .cloned()
            .ok_or(AppServicesError::UnknownPattern(id))?;

        Ok(ViewCompletionTracker::initialize(
            pattern,
            Arc::clone(&self.storage.view_states),
            Arc::clone(&self.registry),
        )
        .await)
    }
}
