//! # Recommendation Service
//!
//! Coordinates a recommendation request end to end:
//! 1. Resolve the seed title against the snapshot
//! 2. Rank with the primary strategy (TF-IDF cosine)
//! 3. Degrade to the genre-overlap fallback if the primary fails
//! 4. Apply post-filters: title dedup, exclusions, artwork eligibility
//! 5. Truncate to k and return full catalogue items
//!
//! Every taxonomy condition (unknown seed, empty catalogue, primary
//! failure) resolves to an empty-but-valid result; the caller never sees
//! an error from this surface.

use catalog::{CatalogSnapshot, CatalogueItem, FeedbackStore, ItemId, UserId, WatchHistory};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::filters::{ArtworkEligibilityFilter, ExclusionFilter, FilterChain, TitleDedupFilter};
use crate::rankers::{GenreOverlapRanker, TfidfCosineRanker};
use crate::traits::{Candidate, Ranker};

/// Content-based recommendation service with a primary and a fallback
/// ranking strategy, both fixed at construction.
pub struct RecommendationService {
    primary: Box<dyn Ranker>,
    fallback: Box<dyn Ranker>,
}

impl RecommendationService {
    /// Service with the default strategies: TF-IDF cosine primary,
    /// genre-overlap fallback.
    pub fn new() -> Self {
        Self {
            primary: Box::new(TfidfCosineRanker::new()),
            fallback: Box::new(GenreOverlapRanker::new()),
        }
    }

    /// Service with explicit strategies (tests, degraded deployments).
    pub fn with_rankers(primary: impl Ranker + 'static, fallback: impl Ranker + 'static) -> Self {
        Self {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }

    /// "Because you watched X": rank items similar to the seed title.
    ///
    /// Returns at most `k` items, best first. An unknown seed or an
    /// empty catalogue yields an empty list.
    pub fn recommend(
        &self,
        snapshot: &CatalogSnapshot,
        seed_title: &str,
        exclude: &HashSet<ItemId>,
        k: usize,
    ) -> Vec<CatalogueItem> {
        if snapshot.is_empty() || k == 0 {
            return Vec::new();
        }

        let Some(seed) = snapshot.find_by_title(seed_title) else {
            debug!(seed = seed_title, "seed title not in catalogue; no recommendations");
            return Vec::new();
        };

        let candidates = self.rank_with_degradation(snapshot, seed, k);

        let chain = FilterChain::new()
            .add_filter(TitleDedupFilter)
            .add_filter(ExclusionFilter::new(exclude.clone()))
            .add_filter(ArtworkEligibilityFilter);

        let mut filtered = match chain.apply(candidates, snapshot) {
            Ok(filtered) => filtered,
            Err(error) => {
                warn!(%error, "candidate filtering failed; returning no recommendations");
                return Vec::new();
            }
        };
        filtered.truncate(k);

        info!(
            seed = seed_title,
            returned = filtered.len(),
            requested = k,
            "recommendations served"
        );

        let items = snapshot.items();
        filtered
            .into_iter()
            .map(|candidate| items[candidate.row].clone())
            .collect()
    }

    /// Personalized entry point: seed from the user's last watched item,
    /// exclusions from their "not interested" feedback.
    pub fn because_you_watched(
        &self,
        snapshot: &CatalogSnapshot,
        history: &WatchHistory,
        feedback: &FeedbackStore,
        user_id: UserId,
        k: usize,
    ) -> Vec<CatalogueItem> {
        let Some(last_item_id) = history.last_watched(user_id) else {
            debug!(user_id, "no watch history; nothing to seed recommendations with");
            return Vec::new();
        };
        let Some(seed) = snapshot.get(last_item_id) else {
            debug!(user_id, last_item_id, "last watched item no longer in catalogue");
            return Vec::new();
        };

        let seed_title = seed.title.clone();
        let exclude = feedback.excluded_ids(user_id);
        self.recommend(snapshot, &seed_title, &exclude, k)
    }

    /// Run the primary ranker, transparently degrading to the fallback
    /// if it fails. A fallback failure yields an empty candidate list,
    /// never an error.
    fn rank_with_degradation(
        &self,
        snapshot: &CatalogSnapshot,
        seed: &CatalogueItem,
        k: usize,
    ) -> Vec<Candidate> {
        match self.primary.rank(snapshot, seed, k) {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(
                    ranker = self.primary.name(),
                    %error,
                    "primary ranker unavailable; degrading to fallback"
                );
                match self.fallback.rank(snapshot, seed, k) {
                    Ok(candidates) => candidates,
                    Err(error) => {
                        warn!(ranker = self.fallback.name(), %error, "fallback ranker failed");
                        Vec::new()
                    }
                }
            }
        }
    }
}

impl Default for RecommendationService {
    fn default() -> Self {
        Self::new()
    }
}
