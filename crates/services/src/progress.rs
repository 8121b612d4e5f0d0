use std::sync::Arc;

use pattern_core::model::{Pattern, PatternCategory};
use pattern_core::{Catalogue, CategoryFilter};

use crate::registry::StudiedPatternRegistry;

/// Studied count for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProgress {
    pub category: PatternCategory,
    pub studied: usize,
    pub total: usize,
}

/// Aggregated study progress, useful for the dashboard.
///
/// Only catalogue patterns are counted, so `studied <= total` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyProgress {
    pub studied: usize,
    pub total: usize,
    pub by_category: Vec<CategoryProgress>,
}

impl StudyProgress {
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.studied.saturating_mul(100) / self.total;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.studied == self.total
    }
}

/// Read-only view over the registry for progress screens.
#[derive(Clone)]
pub struct ProgressService {
    catalogue: Arc<Catalogue>,
    registry: Arc<StudiedPatternRegistry>,
}

impl ProgressService {
    #[must_use]
    pub fn new(catalogue: Arc<Catalogue>, registry: Arc<StudiedPatternRegistry>) -> Self {
        Self {
            catalogue,
            registry,
        }
    }

    pub async fn summary(&self) -> StudyProgress {
        let studied = self.registry.studied_patterns().await;

        let by_category: Vec<CategoryProgress> = PatternCategory::ALL
            .into_iter()
            .map(|category| {
                let in_category = self.catalogue.filter(CategoryFilter::Only(category));
                CategoryProgress {
                    category,
                    studied: in_category
                        .iter()
                        .filter(|p| studied.iter().any(|s| s.id() == p.id()))
                        .count(),
                    total: in_category.len(),
                }
            })
            .collect();

        StudyProgress {
            studied: by_category.iter().map(|c| c.studied).sum(),
            total: self.catalogue.len(),
            by_category,
        }
    }

    /// Studied patterns in completion order.
    pub async fn studied(&self) -> Vec<Pattern> {
        self.registry.studied_patterns().await
    }

    /// Catalogue patterns matching `filter` that are not studied yet.
    pub async fn remaining(&self, filter: CategoryFilter) -> Vec<Pattern> {
        let mut remaining = Vec::new();
        for pattern in self.catalogue.filter(filter) {
            if !self.registry.is_studied(pattern.id()).await {
                remaining.push(pattern.clone());
            }
        }
        remaining
    }
}
