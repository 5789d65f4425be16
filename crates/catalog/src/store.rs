//! The in-memory catalogue store and its snapshot contract.
//!
//! The store owns the ordered list of catalogue items and a generation
//! counter that ticks on every mutation. Consumers that derive state from
//! the catalogue (the similarity index above all) take a [`CatalogSnapshot`]
//! and compare generations to detect staleness; they never reach back into
//! the store.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogueItem, ItemEdit, ItemId, RawItemRecord, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// An immutable view of the catalogue at a point in time.
///
/// Cloning is cheap (the item list is behind an `Arc`). The generation is
/// the store's counter value at the moment the snapshot was taken; two
/// snapshots with equal generations contain identical items.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    items: Arc<[CatalogueItem]>,
    generation: u64,
}

impl CatalogSnapshot {
    /// Build a standalone snapshot outside any store, for callers that
    /// load a catalogue once (files, tests) and have no mutation path to
    /// track.
    ///
    /// The generation is fixed at 0 so a detached snapshot can never
    /// pass a freshness check meant for a store-produced one.
    pub fn detached(items: Vec<CatalogueItem>) -> Self {
        Self {
            items: items.into(),
            generation: 0,
        }
    }

    pub fn items(&self) -> &[CatalogueItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Exact title lookup; the first occurrence wins if the snapshot
    /// somehow carries duplicate titles.
    pub fn find_by_title(&self, title: &str) -> Option<&CatalogueItem> {
        self.items.iter().find(|item| item.title == title)
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogueItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Owned, ordered catalogue of movies and series.
///
/// Items are kept in insertion order (the order the similarity matrix is
/// built in) and indexed by id and by title for O(1) edits and lookups.
/// Titles are unique; the store rejects duplicates the way the storage
/// layer's unique key does.
#[derive(Debug, Default)]
pub struct CatalogStore {
    items: Vec<CatalogueItem>,
    by_id: HashMap<ItemId, usize>,
    by_title: HashMap<String, usize>,
    generation: u64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items in the catalogue
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current generation; bumps on every successful mutation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Insert a new item from a raw record (upload/import path).
    ///
    /// Rejects empty and duplicate titles. On success the generation is
    /// bumped, invalidating any snapshot-derived caches.
    pub fn add_item(&mut self, record: RawItemRecord) -> Result<ItemId> {
        let item = CatalogueItem::from_record(record);

        if item.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle);
        }
        if self.by_title.contains_key(&item.title) {
            return Err(CatalogError::DuplicateTitle { title: item.title });
        }

        let id = item.id;
        self.by_id.insert(id, self.items.len());
        self.by_title.insert(item.title.clone(), self.items.len());
        self.items.push(item);
        self.generation += 1;
        debug!(item_id = id, generation = self.generation, "catalogue item added");
        Ok(id)
    }

    /// Apply an admin edit to an existing item.
    ///
    /// A title change is checked against the uniqueness constraint. Any
    /// successful edit bumps the generation.
    pub fn update_item(&mut self, id: ItemId, edit: ItemEdit) -> Result<()> {
        let idx = *self
            .by_id
            .get(&id)
            .ok_or(CatalogError::UnknownItem { id })?;

        if let Some(new_title) = &edit.title {
            if new_title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle);
            }
            if self.by_title.get(new_title).is_some_and(|&i| i != idx) {
                return Err(CatalogError::DuplicateTitle {
                    title: new_title.clone(),
                });
            }
        }

        let item = &mut self.items[idx];
        if let Some(title) = edit.title {
            self.by_title.remove(&item.title);
            self.by_title.insert(title.clone(), idx);
            item.title = title;
        }
        if let Some(genre) = edit.genre {
            item.genre = genre;
        }
        if let Some(synopsis) = edit.synopsis {
            item.synopsis = synopsis;
        }
        if let Some(cast) = edit.cast {
            item.cast = cast;
        }
        if let Some(artwork) = edit.artwork_url {
            item.artwork_url = if artwork.trim().is_empty() {
                None
            } else {
                Some(artwork)
            };
        }
        if let Some(trailer) = edit.trailer_url {
            item.trailer_url = if trailer.trim().is_empty() {
                None
            } else {
                Some(trailer)
            };
        }

        self.generation += 1;
        debug!(item_id = id, generation = self.generation, "catalogue item updated");
        Ok(())
    }

    /// Soft effect of deleting a user: their uploads stay in the
    /// catalogue with the uploader reference cleared.
    pub fn clear_uploader(&mut self, user_id: UserId) {
        let mut touched = false;
        for item in &mut self.items {
            if item.uploaded_by == Some(user_id) {
                item.uploaded_by = None;
                touched = true;
            }
        }
        if touched {
            self.generation += 1;
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&CatalogueItem> {
        self.by_id.get(&id).map(|&idx| &self.items[idx])
    }

    /// Exact title lookup
    pub fn find_by_title(&self, title: &str) -> Option<&CatalogueItem> {
        self.by_title.get(title).map(|&idx| &self.items[idx])
    }

    /// Case-insensitive title suggestions for search-as-you-type.
    ///
    /// Exact matches sort ahead of substring matches; within each bucket
    /// catalogue order is preserved.
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<&CatalogueItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &CatalogueItem)> = self
            .items
            .iter()
            .filter_map(|item| {
                let title = item.title.to_lowercase();
                if title == query {
                    Some((0, item))
                } else if title.contains(&query) {
                    Some((1, item))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by_key(|(bucket, _)| *bucket);
        matches.into_iter().take(limit).map(|(_, item)| item).collect()
    }

    /// Take an immutable snapshot of the current catalogue.
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            items: self.items.clone().into(),
            generation: self.generation,
        }
    }
}
