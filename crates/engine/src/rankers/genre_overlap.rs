//! Fallback ranking strategy: genre substring overlap.
//!
//! Used when the numeric similarity path is unavailable. Semantics are
//! deliberately different from the cosine ranker, not just slower: items
//! whose genre text contains the seed's genre string (case-insensitive)
//! rank first in catalogue order, and if that yields fewer candidates
//! than requested the remainder is filled with uniformly-random other
//! items.

use anyhow::{Result, anyhow};
use catalog::{CatalogSnapshot, CatalogueItem};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::sync::Mutex;
use tracing::debug;

use crate::traits::{Candidate, Ranker};

/// Score assigned to genre matches; random fills get 0.0
const MATCH_SCORE: f32 = 1.0;

/// Ranks by exact genre-substring match with random fill.
pub struct GenreOverlapRanker {
    rng: Mutex<StdRng>,
}

impl GenreOverlapRanker {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Seed the random fill, for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for GenreOverlapRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ranker for GenreOverlapRanker {
    fn name(&self) -> &str {
        "GenreOverlapRanker"
    }

    fn rank(
        &self,
        snapshot: &CatalogSnapshot,
        seed: &CatalogueItem,
        limit: usize,
    ) -> Result<Vec<Candidate>> {
        if snapshot.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let seed_genre = seed.genre.trim().to_lowercase();
        let items = snapshot.items();

        // Genre matches, in catalogue order. A seed with no genre has
        // nothing to match against and goes straight to random picks.
        let mut candidates: Vec<Candidate> = Vec::new();
        if !seed_genre.is_empty() {
            candidates = items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.title != seed.title)
                .filter(|(_, item)| item.genre.to_lowercase().contains(&seed_genre))
                .map(|(row, item)| Candidate::new(row, item.id, MATCH_SCORE))
                .collect();
        }

        if candidates.len() < limit {
            let matched_rows: Vec<usize> = candidates.iter().map(|c| c.row).collect();
            let pool: Vec<usize> = items
                .iter()
                .enumerate()
                .filter(|(row, item)| {
                    item.title != seed.title && !matched_rows.contains(row)
                })
                .map(|(row, _)| row)
                .collect();

            let fill = limit - candidates.len();
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| anyhow!("fallback rng lock poisoned"))?;
            for &row in pool.choose_multiple(&mut *rng, fill) {
                candidates.push(Candidate::new(row, items[row].id, 0.0));
            }
        }

        debug!(
            seed = %seed.title,
            matches = candidates.iter().filter(|c| c.score == MATCH_SCORE).count(),
            total = candidates.len(),
            "genre-overlap ranking"
        );
        Ok(candidates)
    }
}
