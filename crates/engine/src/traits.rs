//! Core traits for the recommendation engine.
//!
//! Ranking is a strategy chosen at service construction: the primary
//! TF-IDF cosine ranker, or the genre-overlap fallback when the numeric
//! path is unavailable. Both produce the same candidate shape so the
//! post-filter chain does not care which one ran.

use anyhow::Result;
use catalog::{CatalogSnapshot, CatalogueItem, ItemId};

/// A ranked recommendation candidate.
///
/// `row` is the candidate's position in the snapshot's item order, so
/// filters can reach the full item without another lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub row: usize,
    pub item_id: ItemId,
    pub score: f32,
}

impl Candidate {
    pub fn new(row: usize, item_id: ItemId, score: f32) -> Self {
        Self {
            row,
            item_id,
            score,
        }
    }
}

/// A ranking strategy over a catalogue snapshot.
///
/// ## Contract
/// - The seed item itself never appears among the returned candidates.
/// - Candidates come back ordered best-first; ties preserve catalogue
///   order so repeated calls on the same snapshot are deterministic.
/// - An unresolvable seed is a normal empty result, not an error.
/// - `limit` is a hint for how many candidates the caller wants before
///   post-filtering; rankers that rank the whole catalogue may ignore it.
pub trait Ranker: Send + Sync {
    /// Name of this ranker (for logging)
    fn name(&self) -> &str;

    /// Rank catalogue items by relevance to the seed.
    fn rank(
        &self,
        snapshot: &CatalogSnapshot,
        seed: &CatalogueItem,
        limit: usize,
    ) -> Result<Vec<Candidate>>;
}
