//! User activity stores: watch history, reviews, and recommendation
//! feedback.
//!
//! These are collaborators of the recommendation engine, not part of it.
//! The engine reads two things from here: the last watched item (the
//! "because you watched X" seed) and the set of items a user marked as
//! not interested (the exclusion set).

use crate::types::{ItemId, UserId};
use std::collections::{HashMap, HashSet};

/// A single watch event in a user's history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchEvent {
    pub item_id: ItemId,
    /// Unix timestamp of the watch
    pub watched_at: i64,
}

/// Append-only per-user watch history.
#[derive(Debug, Default)]
pub struct WatchHistory {
    events: HashMap<UserId, Vec<WatchEvent>>,
}

impl WatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_watch(&mut self, user_id: UserId, item_id: ItemId, watched_at: i64) {
        self.events
            .entry(user_id)
            .or_default()
            .push(WatchEvent { item_id, watched_at });
    }

    /// All watch events for a user, in recording order
    pub fn history(&self, user_id: UserId) -> &[WatchEvent] {
        self.events
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The most recently watched item, the seed for recommendations.
    /// Recording order breaks timestamp ties.
    pub fn last_watched(&self, user_id: UserId) -> Option<ItemId> {
        self.events.get(&user_id).and_then(|events| {
            events
                .iter()
                .enumerate()
                .max_by_key(|(i, event)| (event.watched_at, *i))
                .map(|(_, event)| event.item_id)
        })
    }
}

/// A star rating with optional free-text review
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub rating: u8,
    pub text: String,
    /// Unix timestamp of the latest submission
    pub submitted_at: i64,
}

/// One review per (user, item); resubmitting overwrites rating, text,
/// and timestamp, matching the storage layer's upsert.
#[derive(Debug, Default)]
pub struct ReviewStore {
    reviews: HashMap<(UserId, ItemId), Review>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, user_id: UserId, item_id: ItemId, review: Review) {
        self.reviews.insert((user_id, item_id), review);
    }

    pub fn get(&self, user_id: UserId, item_id: ItemId) -> Option<&Review> {
        self.reviews.get(&(user_id, item_id))
    }

    /// Average rating and review count for an item
    pub fn rating_summary(&self, item_id: ItemId) -> (f32, usize) {
        let ratings: Vec<u8> = self
            .reviews
            .iter()
            .filter(|((_, id), _)| *id == item_id)
            .map(|(_, review)| review.rating)
            .collect();

        if ratings.is_empty() {
            return (0.0, 0);
        }
        let total: u32 = ratings.iter().map(|&r| r as u32).sum();
        (total as f32 / ratings.len() as f32, ratings.len())
    }
}

/// "Not interested" feedback on recommendations.
///
/// At most one entry per (user, item); repeat submissions are a no-op
/// success, never an error.
#[derive(Debug, Default)]
pub struct FeedbackStore {
    not_interested: HashSet<(UserId, ItemId)>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a user does not want to see an item recommended.
    /// Returns whether the pair was newly recorded.
    pub fn add_not_interested(&mut self, user_id: UserId, item_id: ItemId) -> bool {
        self.not_interested.insert((user_id, item_id))
    }

    /// Item ids the user has dismissed, for use as an exclusion set
    pub fn excluded_ids(&self, user_id: UserId) -> HashSet<ItemId> {
        self.not_interested
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .map(|(_, item_id)| *item_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_watched_picks_latest_timestamp() {
        let mut history = WatchHistory::new();
        history.record_watch(1, 10, 100);
        history.record_watch(1, 20, 300);
        history.record_watch(1, 30, 200);

        assert_eq!(history.last_watched(1), Some(20));
        assert_eq!(history.last_watched(2), None);
        assert_eq!(history.history(1).len(), 3);
    }

    #[test]
    fn last_watched_tie_goes_to_most_recent_entry() {
        let mut history = WatchHistory::new();
        history.record_watch(1, 10, 100);
        history.record_watch(1, 20, 100);

        assert_eq!(history.last_watched(1), Some(20));
    }

    #[test]
    fn review_resubmission_overwrites() {
        let mut reviews = ReviewStore::new();
        reviews.upsert(
            1,
            10,
            Review {
                rating: 3,
                text: "fine".to_string(),
                submitted_at: 100,
            },
        );
        reviews.upsert(
            1,
            10,
            Review {
                rating: 5,
                text: "grew on me".to_string(),
                submitted_at: 200,
            },
        );

        let review = reviews.get(1, 10).unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.submitted_at, 200);

        let (avg, count) = reviews.rating_summary(10);
        assert_eq!(count, 1);
        assert!((avg - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rating_summary_averages_across_users() {
        let mut reviews = ReviewStore::new();
        for (user, rating) in [(1, 4), (2, 2), (3, 3)] {
            reviews.upsert(
                user,
                10,
                Review {
                    rating,
                    text: String::new(),
                    submitted_at: 0,
                },
            );
        }

        let (avg, count) = reviews.rating_summary(10);
        assert_eq!(count, 3);
        assert!((avg - 3.0).abs() < 1e-6);
        assert_eq!(reviews.rating_summary(99), (0.0, 0));
    }

    #[test]
    fn feedback_is_idempotent() {
        let mut feedback = FeedbackStore::new();
        assert!(feedback.add_not_interested(1, 10));
        assert!(!feedback.add_not_interested(1, 10));

        feedback.add_not_interested(1, 20);
        feedback.add_not_interested(2, 30);

        let excluded = feedback.excluded_ids(1);
        assert_eq!(excluded.len(), 2);
        assert!(excluded.contains(&10));
        assert!(excluded.contains(&20));
        assert!(!excluded.contains(&30));
    }
}
