//! TF-IDF vectorization over a document corpus.
//!
//! The vocabulary is learned from the corpus at hand and thrown away with
//! it; nothing persists across rebuilds. Weights use the smoothed inverse
//! document frequency `ln((1 + n) / (1 + df)) + 1` and rows are
//! L2-normalized, so a plain dot product between two rows is their cosine
//! similarity.

use crate::text::tokenize;
use std::collections::HashMap;

/// Learns a vocabulary and idf weights from a corpus, then maps documents
/// to L2-normalized TF-IDF vectors.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and document frequencies from a corpus.
    ///
    /// An empty corpus (or one whose documents tokenize to nothing)
    /// yields an empty vocabulary; every transformed vector is then
    /// zero-dimensional, which downstream dot products treat as
    /// similarity 0.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let n_docs = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen: Vec<String> = tokenize(doc.as_ref());
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Sort terms for a deterministic vocabulary order
        let mut terms: Vec<(String, usize)> = doc_freq.into_iter().collect();
        terms.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, (term, df)) in terms.into_iter().enumerate() {
            vocabulary.insert(term, idx);
            idf.push(((1.0 + n_docs as f32) / (1.0 + df as f32)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    /// Map a document to its L2-normalized TF-IDF vector.
    ///
    /// Terms outside the fitted vocabulary are ignored. A document with
    /// no in-vocabulary terms maps to the zero vector.
    pub fn transform(&self, document: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.vocabulary.len()];
        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                vector[idx] += 1.0;
            }
        }

        for (idx, weight) in vector.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        let norm: f32 = vector.iter().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for weight in &mut vector {
                *weight /= norm;
            }
        }
        vector
    }

    /// Fit on a corpus and transform every document in it.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<Vec<f32>>) {
        let vectorizer = Self::fit(documents);
        let vectors = documents
            .iter()
            .map(|doc| vectorizer.transform(doc.as_ref()))
            .collect();
        (vectorizer, vectors)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Dot product of two equal-length vectors.
///
/// With L2-normalized TF-IDF rows this is cosine similarity.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
