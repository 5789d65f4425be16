//! # Similarity Crate
//!
//! Builds the content-similarity index the recommendation engine ranks
//! against: each catalogue item's genre/synopsis/cast text is vectorized
//! with TF-IDF and compared pairwise by cosine similarity.
//!
//! ## Main Components
//!
//! - **text**: tokenizer and English stop words
//! - **tfidf**: corpus-local TF-IDF vectorization with L2 normalization
//! - **index**: the dense K×K `SimilarityIndex` built from a
//!   `CatalogSnapshot`
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::SimilarityIndex;
//!
//! let index = SimilarityIndex::build(&store.snapshot());
//! if let Some(row) = index.row_for_title("Alien") {
//!     let scores = index.scores_row(row);
//! }
//! ```

// Public modules
pub mod index;
pub mod text;
pub mod tfidf;

// Re-export commonly used types
pub use index::SimilarityIndex;
pub use tfidf::TfidfVectorizer;
