//! Post-filters applied to ranked candidates, in a fixed order:
//! title dedup, caller exclusions, artwork display-eligibility.
//!
//! Filters run after ranking and before truncation to k, so removing a
//! candidate never pulls in an item from a different ranking pass.

use anyhow::Result;
use catalog::{CatalogSnapshot, ItemId};
use std::collections::HashSet;
use tracing::debug;

use crate::traits::Candidate;

/// A single candidate post-filter.
pub trait CandidateFilter: Send + Sync {
    /// Name of this filter (for logging)
    fn name(&self) -> &str;

    /// Apply this filter, returning the surviving candidates in order.
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        snapshot: &CatalogSnapshot,
    ) -> Result<Vec<Candidate>>;
}

/// Keeps only the first (highest-ranked) candidate per title.
pub struct TitleDedupFilter;

impl CandidateFilter for TitleDedupFilter {
    fn name(&self) -> &str {
        "TitleDedupFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        snapshot: &CatalogSnapshot,
    ) -> Result<Vec<Candidate>> {
        let items = snapshot.items();
        let mut seen: HashSet<&str> = HashSet::new();
        Ok(candidates
            .into_iter()
            .filter(|candidate| seen.insert(items[candidate.row].title.as_str()))
            .collect())
    }
}

/// Drops candidates the caller asked to exclude ("not interested").
pub struct ExclusionFilter {
    excluded: HashSet<ItemId>,
}

impl ExclusionFilter {
    pub fn new(excluded: HashSet<ItemId>) -> Self {
        Self { excluded }
    }
}

impl CandidateFilter for ExclusionFilter {
    fn name(&self) -> &str {
        "ExclusionFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _snapshot: &CatalogSnapshot,
    ) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| !self.excluded.contains(&candidate.item_id))
            .collect())
    }
}

/// Drops candidates whose artwork reference would render as a broken
/// image.
pub struct ArtworkEligibilityFilter;

impl CandidateFilter for ArtworkEligibilityFilter {
    fn name(&self) -> &str {
        "ArtworkEligibilityFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        snapshot: &CatalogSnapshot,
    ) -> Result<Vec<Candidate>> {
        let items = snapshot.items();
        Ok(candidates
            .into_iter()
            .filter(|candidate| items[candidate.row].has_displayable_artwork())
            .collect())
    }
}

/// Chains filters in order.
pub struct FilterChain {
    filters: Vec<Box<dyn CandidateFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn add_filter(mut self, filter: impl CandidateFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        snapshot: &CatalogSnapshot,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, snapshot)?;
            debug!(
                filter = filter.name(),
                before,
                after = current.len(),
                "candidate filter applied"
            );
        }
        Ok(current)
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}
