use std::sync::Arc;

use pattern_core::model::{Pattern, Section, ViewState};
use storage::repository::ViewStateRepository;
use tracing::{debug, warn};

use crate::registry::StudiedPatternRegistry;

/// What a single section-open event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// Already viewed, or not a tracked section.
    Unchanged,
    /// Newly marked; the pattern is not fully viewed yet.
    Recorded,
    /// Newly marked and this completed the pattern.
    Completed,
}

/// Tracks which sections of one pattern's detail view have been opened and
/// reports the pattern as studied once all of them have.
///
/// Each mutation persists the full view state, then checks for completion.
/// Storage failures are logged and otherwise ignored: an unsaved flag simply
/// comes back unset the next time the pattern is opened.
pub struct ViewCompletionTracker {
    pattern: Pattern,
    state: ViewState,
    repo: Arc<dyn ViewStateRepository>,
    registry: Arc<StudiedPatternRegistry>,
}

impl ViewCompletionTracker {
    /// Resume the stored view state for `pattern`, or start with nothing viewed.
    ///
    /// If the stored state is already complete the registry is told again, which
    /// repairs a studied list whose earlier write was lost.
    pub async fn initialize(
        pattern: Pattern,
        repo: Arc<dyn ViewStateRepository>,
        registry: Arc<StudiedPatternRegistry>,
    ) -> Self {
        let state = match repo.load_view_state(pattern.id()).await {
            Ok(Some(state)) => state,
            Ok(None) => ViewState::new(),
            Err(err) => {
                warn!(
                    pattern_id = %pattern.id(),
                    error = %err,
                    "failed to load view state, starting fresh"
                );
                ViewState::new()
            }
        };

        if state.is_fully_viewed() {
            registry.add_studied_pattern(&pattern).await;
        }

        Self {
            pattern,
            state,
            repo,
            registry,
        }
    }

    /// Record that a section was opened.
    pub async fn mark_section_opened(&mut self, section: Section) -> MarkOutcome {
        let was_complete = self.state.is_fully_viewed();
        if !self.state.mark(section) {
            return MarkOutcome::Unchanged;
        }

        self.persist().await;

        if !was_complete && self.state.is_fully_viewed() {
            self.registry.add_studied_pattern(&self.pattern).await;
            return MarkOutcome::Completed;
        }
        MarkOutcome::Recorded
    }

    /// Record a section by its key; unknown keys are ignored.
    pub async fn mark_section_key(&mut self, key: &str) -> MarkOutcome {
        match Section::parse(key) {
            Some(section) => self.mark_section_opened(section).await,
            None => {
                debug!(pattern_id = %self.pattern.id(), key, "ignoring unknown section key");
                MarkOutcome::Unchanged
            }
        }
    }

    #[must_use]
    pub fn is_fully_viewed(&self) -> bool {
        self.state.is_fully_viewed()
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    async fn persist(&self) {
        if let Err(err) = self
            .repo
            .save_view_state(self.pattern.id(), &self.state)
            .await
        {
            warn!(
                pattern_id = %self.pattern.id(),
                error = %err,
                "failed to persist view state"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use pattern_core::model::{PatternCategory, PatternDraft, PatternId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::repository::{Storage, StorageError};

    fn bridge() -> Pattern {
        PatternDraft::new(PatternId::new(7), "Bridge", PatternCategory::Structural)
            .validate()
            .unwrap()
    }

    fn pattern(id: u64) -> Pattern {
        PatternDraft::new(PatternId::new(id), "Pattern", PatternCategory::Behavioral)
            .validate()
            .unwrap()
    }

    /// View-state repository whose reads and/or writes fail.
    #[derive(Default)]
    struct BrokenViewRepo {
        fail_reads: bool,
        fail_writes: bool,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl ViewStateRepository for BrokenViewRepo {
        async fn load_view_state(&self, _id: PatternId) -> Result<Option<ViewState>, StorageError> {
            if self.fail_reads {
                return Err(StorageError::Connection("simulated I/O error".into()));
            }
            Ok(None)
        }

        async fn save_view_state(
            &self,
            _id: PatternId,
            _state: &ViewState,
        ) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(StorageError::Connection("simulated I/O error".into()));
            }
            Ok(())
        }
    }

    async fn tracker_for(pattern: Pattern, storage: &Storage) -> ViewCompletionTracker {
        let registry = Arc::new(StudiedPatternRegistry::load(Arc::clone(&storage.studied)).await);
        ViewCompletionTracker::initialize(pattern, Arc::clone(&storage.view_states), registry).await
    }

    #[tokio::test]
    async fn bridge_completes_only_after_case_and_result() {
        let storage = Storage::in_memory();
        let mut tracker = tracker_for(bridge(), &storage).await;

        for key in ["description", "prosAndCons", "code", "task"] {
            assert_eq!(tracker.mark_section_key(key).await, MarkOutcome::Recorded);
        }
        assert!(!tracker.is_fully_viewed());
        assert!(tracker.registry.studied_patterns().await.is_empty());

        assert_eq!(
            tracker.mark_section_opened(Section::Case).await,
            MarkOutcome::Recorded
        );
        assert_eq!(
            tracker.mark_section_opened(Section::Result).await,
            MarkOutcome::Completed
        );
        assert!(tracker.is_fully_viewed());

        let studied = tracker.registry.studied_patterns().await;
        assert_eq!(studied.len(), 1);
        assert_eq!(studied[0].id(), PatternId::new(7));

        // Further opens change nothing.
        assert_eq!(
            tracker.mark_section_opened(Section::Code).await,
            MarkOutcome::Unchanged
        );
        assert_eq!(tracker.registry.len().await, 1);
    }

    #[tokio::test]
    async fn read_failure_falls_back_to_nothing_viewed() {
        let repo = Arc::new(BrokenViewRepo {
            fail_reads: true,
            ..BrokenViewRepo::default()
        });
        let registry = Arc::new(StudiedPatternRegistry::load(Storage::in_memory().studied).await);

        let tracker = ViewCompletionTracker::initialize(pattern(3), repo, registry).await;
        assert_eq!(tracker.view_state(), &ViewState::new());
        assert!(!tracker.is_fully_viewed());
    }

    #[tokio::test]
    async fn write_failure_keeps_in_memory_flags() {
        let repo = Arc::new(BrokenViewRepo {
            fail_writes: true,
            ..BrokenViewRepo::default()
        });
        let registry = Arc::new(StudiedPatternRegistry::load(Storage::in_memory().studied).await);
        let mut tracker =
            ViewCompletionTracker::initialize(pattern(12), repo.clone(), Arc::clone(&registry))
                .await;

        for section in Section::ALL {
            tracker.mark_section_opened(section).await;
        }
        assert!(tracker.is_fully_viewed());
        assert!(registry.is_studied(PatternId::new(12)).await);
        assert_eq!(repo.writes.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn unknown_and_repeated_keys_do_not_write() {
        let repo = Arc::new(BrokenViewRepo::default());
        let registry = Arc::new(StudiedPatternRegistry::load(Storage::in_memory().studied).await);
        let mut tracker = ViewCompletionTracker::initialize(pattern(2), repo.clone(), registry).await;

        assert_eq!(tracker.mark_section_key("images").await, MarkOutcome::Unchanged);
        assert_eq!(
            tracker.mark_section_key("pros & cons").await,
            MarkOutcome::Recorded
        );
        assert_eq!(
            tracker.mark_section_key("prosAndCons").await,
            MarkOutcome::Unchanged
        );
        assert!(tracker.view_state().is_viewed(Section::ProsAndCons));
        assert_eq!(repo.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn reopening_resumes_saved_flags() {
        let storage = Storage::in_memory();
        {
            let mut tracker = tracker_for(pattern(16), &storage).await;
            tracker.mark_section_opened(Section::Description).await;
            tracker.mark_section_opened(Section::Task).await;
        }

        let tracker = tracker_for(pattern(16), &storage).await;
        assert!(tracker.view_state().is_viewed(Section::Description));
        assert!(tracker.view_state().is_viewed(Section::Task));
        assert_eq!(tracker.view_state().viewed_count(), 2);
    }

    #[tokio::test]
    async fn complete_stored_state_repairs_registry_on_open() {
        let storage = Storage::in_memory();
        let mut complete = ViewState::new();
        for section in Section::ALL {
            complete.mark(section);
        }
        storage
            .view_states
            .save_view_state(PatternId::new(21), &complete)
            .await
            .unwrap();

        let tracker = tracker_for(pattern(21), &storage).await;
        assert!(tracker.is_fully_viewed());
        assert!(tracker.registry.is_studied(PatternId::new(21)).await);
    }
}
