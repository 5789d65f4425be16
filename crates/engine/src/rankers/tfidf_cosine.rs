//! Primary ranking strategy: cosine similarity over cached TF-IDF
//! vectors.
//!
//! The ranker owns the process-wide similarity index cache. The index is
//! immutable once built; staleness is detected by comparing its recorded
//! generation against the snapshot's. A rebuild constructs a fresh index
//! with no locks held and swaps it in behind the `RwLock`, so concurrent
//! readers always see either the previous complete index or the new one.
//! The rebuild mutex collapses simultaneous cache misses into a single
//! build.

use anyhow::{Result, anyhow};
use catalog::{CatalogSnapshot, CatalogueItem};
use similarity::SimilarityIndex;
use std::sync::{Arc, Mutex, RwLock};
use tracing::{debug, info};

use crate::traits::{Candidate, Ranker};

/// Ranks by TF-IDF cosine similarity against a cached all-pairs index.
pub struct TfidfCosineRanker {
    cached: RwLock<Option<Arc<SimilarityIndex>>>,
    rebuild: Mutex<()>,
}

impl TfidfCosineRanker {
    pub fn new() -> Self {
        Self {
            cached: RwLock::new(None),
            rebuild: Mutex::new(()),
        }
    }

    /// Get an index valid for this snapshot, rebuilding if the cached
    /// one is missing or predates it.
    fn current_index(&self, snapshot: &CatalogSnapshot) -> Result<Arc<SimilarityIndex>> {
        if let Some(index) = self.read_if_fresh(snapshot)? {
            return Ok(index);
        }

        // Single-flight: one rebuild at a time. Whoever lost the race
        // re-checks and finds the fresh index already swapped in.
        let _rebuild_guard = self
            .rebuild
            .lock()
            .map_err(|_| anyhow!("similarity rebuild lock poisoned"))?;

        if let Some(index) = self.read_if_fresh(snapshot)? {
            debug!(
                generation = snapshot.generation(),
                "index rebuilt by a concurrent request"
            );
            return Ok(index);
        }

        info!(
            generation = snapshot.generation(),
            items = snapshot.len(),
            "rebuilding similarity index"
        );
        let fresh = Arc::new(SimilarityIndex::build(snapshot));

        let mut slot = self
            .cached
            .write()
            .map_err(|_| anyhow!("similarity index lock poisoned"))?;
        *slot = Some(Arc::clone(&fresh));
        Ok(fresh)
    }

    fn read_if_fresh(&self, snapshot: &CatalogSnapshot) -> Result<Option<Arc<SimilarityIndex>>> {
        let slot = self
            .cached
            .read()
            .map_err(|_| anyhow!("similarity index lock poisoned"))?;
        Ok(slot
            .as_ref()
            .filter(|index| index.generation() == snapshot.generation())
            .map(Arc::clone))
    }
}

impl Default for TfidfCosineRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ranker for TfidfCosineRanker {
    fn name(&self) -> &str {
        "TfidfCosineRanker"
    }

    /// Rank every other catalogue item by similarity to the seed.
    ///
    /// Returns the full ranking (the caller filters before truncating).
    /// Sorting is stable, so equal scores keep catalogue order.
    fn rank(
        &self,
        snapshot: &CatalogSnapshot,
        seed: &CatalogueItem,
        _limit: usize,
    ) -> Result<Vec<Candidate>> {
        if snapshot.is_empty() {
            return Ok(Vec::new());
        }

        let index = self.current_index(snapshot)?;

        let Some(seed_row) = index.row_for_title(&seed.title) else {
            debug!(seed = %seed.title, "seed title not present in index");
            return Ok(Vec::new());
        };

        let scores = index.scores_row(seed_row);
        let mut candidates: Vec<Candidate> = scores
            .iter()
            .enumerate()
            .filter(|(row, _)| *row != seed_row)
            .map(|(row, &score)| Candidate::new(row, index.item_id(row), score))
            .collect();

        // Stable sort keeps catalogue order on score ties. Scores are
        // dot products of finite unit vectors, never NaN.
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(candidates)
    }
}
