//! # Catalog Crate
//!
//! Domain types and in-memory stores for the movie/series catalogue and
//! the user activity around it.
//!
//! ## Main Components
//!
//! - **types**: `CatalogueItem` and friends, with one explicit
//!   missing-field normalization step
//! - **store**: `CatalogStore` with its generation counter and
//!   `CatalogSnapshot` contract
//! - **activity**: watch history, reviews, and recommendation feedback
//! - **error**: typed errors for store mutations
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogStore, RawItemRecord};
//!
//! let mut store = CatalogStore::new();
//! store.add_item(record)?;
//!
//! // Derived state (the similarity index) works off snapshots
//! let snapshot = store.snapshot();
//! assert_eq!(snapshot.generation(), store.generation());
//! ```

// Public modules
pub mod activity;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use activity::{FeedbackStore, Review, ReviewStore, WatchEvent, WatchHistory};
pub use error::{CatalogError, Result};
pub use store::{CatalogSnapshot, CatalogStore};
pub use types::{CatalogueItem, ItemEdit, ItemId, ItemKind, RawItemRecord, UserId};
