//! The all-pairs similarity index over a catalogue snapshot.
//!
//! A `SimilarityIndex` is derived state: it is valid for exactly one
//! snapshot generation, safe to discard at any time, and rebuilt from
//! scratch on demand. Building the same snapshot twice yields the same
//! matrix.

use catalog::{CatalogSnapshot, ItemId};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

use crate::tfidf::{TfidfVectorizer, dot};

/// Dense K×K content-similarity matrix plus the row↔item mapping it was
/// built against.
///
/// Row and column order match the snapshot's item order. Cell (i, j) is
/// the cosine similarity of the TF-IDF vectors of items i and j, so the
/// matrix is symmetric and each diagonal entry is the maximum of its row.
#[derive(Debug)]
pub struct SimilarityIndex {
    generation: u64,
    ids: Vec<ItemId>,
    titles: Vec<String>,
    /// Exact title → row; first occurrence wins for duplicate titles
    title_rows: HashMap<String, usize>,
    scores: Vec<Vec<f32>>,
}

impl SimilarityIndex {
    /// Build the index for a catalogue snapshot.
    ///
    /// An empty snapshot produces a zero-row index; items with empty
    /// text fields contribute zero vectors and end up dissimilar to
    /// everything, including themselves.
    pub fn build(snapshot: &CatalogSnapshot) -> Self {
        let start = Instant::now();
        let items = snapshot.items();

        let documents: Vec<String> = items.iter().map(|item| item.composite_text()).collect();
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&documents);

        let scores: Vec<Vec<f32>> = vectors
            .par_iter()
            .map(|row_vector| {
                vectors
                    .iter()
                    .map(|other| dot(row_vector, other))
                    .collect()
            })
            .collect();

        let ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
        let titles: Vec<String> = items.iter().map(|item| item.title.clone()).collect();

        let mut title_rows = HashMap::with_capacity(titles.len());
        for (row, title) in titles.iter().enumerate() {
            title_rows.entry(title.clone()).or_insert(row);
        }

        debug!(
            items = items.len(),
            vocabulary = vectorizer.vocabulary_size(),
            generation = snapshot.generation(),
            elapsed = ?start.elapsed(),
            "similarity index built"
        );

        Self {
            generation: snapshot.generation(),
            ids,
            titles,
            title_rows,
            scores,
        }
    }

    /// Generation of the snapshot this index was built from
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of rows (= items in the source snapshot)
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve an exact title to its row index
    pub fn row_for_title(&self, title: &str) -> Option<usize> {
        self.title_rows.get(title).copied()
    }

    /// The similarity scores of one row against every item
    pub fn scores_row(&self, row: usize) -> &[f32] {
        &self.scores[row]
    }

    pub fn item_id(&self, row: usize) -> ItemId {
        self.ids[row]
    }

    pub fn title(&self, row: usize) -> &str {
        &self.titles[row]
    }
}
