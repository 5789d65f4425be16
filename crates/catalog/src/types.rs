//! Core domain types for the movie/series catalogue.
//!
//! Catalogue records arrive from storage with many nullable text columns.
//! All treat-missing-as-empty normalization happens in one place,
//! [`CatalogueItem::from_record`], so the recommendation code downstream
//! never has to default anything.

use serde::{Deserialize, Serialize};

/// Unique identifier for a catalogue item
pub type ItemId = u32;

/// Unique identifier for a user
pub type UserId = u32;

/// Whether a catalogue entry is a single film or an episodic series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Movie,
    Series,
}

/// A catalogue row as it comes out of storage or an import file.
///
/// Every text column may be absent. This is the only type with `Option`
/// text fields; [`CatalogueItem::from_record`] collapses them to empty
/// strings on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawItemRecord {
    pub id: ItemId,
    pub title: String,
    #[serde(default = "default_kind")]
    pub kind: ItemKind,
    pub genre: Option<String>,
    pub synopsis: Option<String>,
    pub cast: Option<String>,
    pub artwork_url: Option<String>,
    pub trailer_url: Option<String>,
    pub audio_languages: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    pub uploaded_by: Option<UserId>,
}

fn default_kind() -> ItemKind {
    ItemKind::Movie
}

/// One movie or series in the catalogue.
///
/// Text fields are always present (possibly empty); only the reference
/// fields stay optional. `uploaded_by` is a weak reference: deleting the
/// uploading user clears it but never removes the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub id: ItemId,
    pub title: String,
    pub kind: ItemKind,
    /// Free-text comma-separated genre tags, e.g. "Drama, Thriller"
    pub genre: String,
    pub synopsis: String,
    /// Free-text comma-separated cast names
    pub cast: String,
    pub artwork_url: Option<String>,
    pub trailer_url: Option<String>,
    /// Free-text comma-separated audio language tags
    pub audio_languages: String,
    /// Unix timestamp of when the item entered the catalogue
    pub created_at: i64,
    pub uploaded_by: Option<UserId>,
}

impl CatalogueItem {
    /// Normalize a raw storage record into a catalogue item.
    ///
    /// Absent text fields become empty strings; URL-ish fields stay
    /// `None` when absent or blank so display-eligibility checks have
    /// something honest to look at.
    pub fn from_record(record: RawItemRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            kind: record.kind,
            genre: record.genre.unwrap_or_default(),
            synopsis: record.synopsis.unwrap_or_default(),
            cast: record.cast.unwrap_or_default(),
            artwork_url: normalize_url(record.artwork_url),
            trailer_url: normalize_url(record.trailer_url),
            audio_languages: record.audio_languages.unwrap_or_default(),
            created_at: record.created_at,
            uploaded_by: record.uploaded_by,
        }
    }

    /// The composite text document used for similarity indexing:
    /// genre, synopsis, and cast joined with spaces, in that order.
    pub fn composite_text(&self) -> String {
        format!("{} {} {}", self.genre, self.synopsis, self.cast)
    }

    /// Whether this item has an artwork reference that will actually
    /// render: a trimmed URL with a recognized scheme prefix.
    pub fn has_displayable_artwork(&self) -> bool {
        self.artwork_url
            .as_deref()
            .map(|url| {
                let url = url.trim();
                url.starts_with("http://") || url.starts_with("https://")
            })
            .unwrap_or(false)
    }
}

fn normalize_url(url: Option<String>) -> Option<String> {
    url.filter(|u| !u.trim().is_empty())
}

/// A patch describing an admin edit to an existing catalogue item.
///
/// `None` fields are left untouched; `Some` fields overwrite. Setting
/// `artwork_url` to `Some(String::new())` clears the artwork.
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub synopsis: Option<String>,
    pub cast: Option<String>,
    pub artwork_url: Option<String>,
    pub trailer_url: Option<String>,
}
