//! Ranking strategy implementations.

pub mod genre_overlap;
pub mod tfidf_cosine;

// Re-export for convenience
pub use genre_overlap::GenreOverlapRanker;
pub use tfidf_cosine::TfidfCosineRanker;
