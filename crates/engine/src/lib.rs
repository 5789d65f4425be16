//! # Recommendation Engine
//!
//! Content-based recommendation over a catalogue snapshot:
//!
//! - **Rankers**: pluggable strategies behind the [`Ranker`] trait. The
//!   primary [`TfidfCosineRanker`] scores TF-IDF cosine similarity from a
//!   cached all-pairs index; the [`GenreOverlapRanker`] is the degraded
//!   fallback.
//! - **Filters**: ordered post-processing of ranked candidates (title
//!   dedup, caller exclusions, artwork eligibility).
//! - **Service**: [`RecommendationService`] ties the pieces together and
//!   guarantees an empty-but-valid result on every failure path.

pub mod filters;
pub mod rankers;
pub mod service;
pub mod traits;

pub use filters::{
    ArtworkEligibilityFilter, CandidateFilter, ExclusionFilter, FilterChain, TitleDedupFilter,
};
pub use rankers::{GenreOverlapRanker, TfidfCosineRanker};
pub use service::RecommendationService;
pub use traits::{Candidate, Ranker};
