//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while mutating or querying the catalogue store
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Titles are unique across the catalogue; inserting a second item
    /// with the same title is rejected
    #[error("An item titled '{title}' already exists in the catalogue")]
    DuplicateTitle { title: String },

    /// An edit or lookup referenced an id that is not in the store
    #[error("No catalogue item with id {id}")]
    UnknownItem { id: u32 },

    /// Title is a required field
    #[error("Catalogue items must have a non-empty title")]
    EmptyTitle,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
