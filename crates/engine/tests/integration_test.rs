//! Integration tests for the recommendation engine.
//!
//! These exercise the full path: catalogue store, snapshot, TF-IDF index
//! build, ranking, post-filtering, and the degraded fallback.

use catalog::{
    CatalogStore, FeedbackStore, ItemEdit, ItemKind, RawItemRecord, WatchHistory,
};
use engine::{GenreOverlapRanker, Ranker, RecommendationService, TfidfCosineRanker};
use std::collections::HashSet;

fn record(id: u32, title: &str, genre: &str, synopsis: &str, cast: &str) -> RawItemRecord {
    RawItemRecord {
        id,
        title: title.to_string(),
        kind: ItemKind::Movie,
        genre: Some(genre.to_string()),
        synopsis: Some(synopsis.to_string()),
        cast: Some(cast.to_string()),
        artwork_url: Some(format!("https://posters.example.com/{id}.jpg")),
        trailer_url: None,
        audio_languages: None,
        created_at: 0,
        uploaded_by: Some(1),
    }
}

/// A small but realistic catalogue: two clusters (space sci-fi and
/// mob crime) plus one outlier.
fn create_test_catalogue() -> CatalogStore {
    let mut store = CatalogStore::new();
    store
        .add_item(record(
            1,
            "Alien",
            "Horror, Sci-Fi",
            "The crew of a commercial spacecraft encounters a deadly lifeform",
            "Sigourney Weaver, Tom Skerritt",
        ))
        .unwrap();
    store
        .add_item(record(
            2,
            "Aliens",
            "Action, Sci-Fi",
            "Ripley returns to the planet with a unit of colonial marines",
            "Sigourney Weaver, Michael Biehn",
        ))
        .unwrap();
    store
        .add_item(record(
            3,
            "The Godfather",
            "Crime, Drama",
            "The aging patriarch of a crime dynasty transfers control to his son",
            "Marlon Brando, Al Pacino",
        ))
        .unwrap();
    store
        .add_item(record(
            4,
            "Goodfellas",
            "Crime, Drama",
            "The story of Henry Hill and his life in the mob",
            "Robert De Niro, Ray Liotta",
        ))
        .unwrap();
    store
        .add_item(record(
            5,
            "Paddington",
            "Comedy, Family",
            "A young bear travels to London in search of a home",
            "Ben Whishaw, Hugh Bonneville",
        ))
        .unwrap();
    store
}

#[test]
fn similar_items_cluster_together() {
    let store = create_test_catalogue();
    let service = RecommendationService::new();

    let recs = service.recommend(&store.snapshot(), "The Godfather", &HashSet::new(), 2);
    assert_eq!(recs[0].title, "Goodfellas");

    let recs = service.recommend(&store.snapshot(), "Alien", &HashSet::new(), 2);
    assert_eq!(recs[0].title, "Aliens");
}

#[test]
fn unknown_seed_and_empty_catalogue_yield_empty() {
    let store = create_test_catalogue();
    let service = RecommendationService::new();

    assert!(service
        .recommend(&store.snapshot(), "Not In The Catalogue", &HashSet::new(), 5)
        .is_empty());

    let empty = CatalogStore::new();
    assert!(service
        .recommend(&empty.snapshot(), "Alien", &HashSet::new(), 5)
        .is_empty());
}

#[test]
fn exclusions_shrink_but_never_reorder_results() {
    let store = create_test_catalogue();
    let service = RecommendationService::new();
    let snapshot = store.snapshot();

    let unfiltered = service.recommend(&snapshot, "Alien", &HashSet::new(), 4);
    let excluded_id = unfiltered[0].id;
    let filtered = service.recommend(&snapshot, "Alien", &HashSet::from([excluded_id]), 4);

    assert!(filtered.iter().all(|item| item.id != excluded_id));
    assert!(filtered.len() <= unfiltered.len());

    // Remaining items keep their relative order
    let unfiltered_rest: Vec<u32> = unfiltered
        .iter()
        .map(|item| item.id)
        .filter(|id| *id != excluded_id)
        .collect();
    let filtered_ids: Vec<u32> = filtered.iter().map(|item| item.id).collect();
    assert!(unfiltered_rest.starts_with(&filtered_ids) || filtered_ids == unfiltered_rest);
}

#[test]
fn catalogue_edit_is_reflected_in_next_request() {
    let mut store = create_test_catalogue();
    let service = RecommendationService::new();

    let before = service.recommend(&store.snapshot(), "Paddington", &HashSet::new(), 1);
    assert!(!before.is_empty());

    // Rewrite the outlier into the crime cluster
    store
        .update_item(
            5,
            ItemEdit {
                genre: Some("Crime, Drama".to_string()),
                synopsis: Some("A bear infiltrates the London mob".to_string()),
                cast: Some("Robert De Niro".to_string()),
                ..ItemEdit::default()
            },
        )
        .unwrap();

    let recs = service.recommend(&store.snapshot(), "Goodfellas", &HashSet::new(), 4);
    assert!(
        recs.iter().any(|item| item.id == 5),
        "edited item should surface among crime recommendations"
    );
}

#[test]
fn results_never_include_broken_artwork() {
    let mut store = create_test_catalogue();
    let mut bad = record(
        6,
        "The Conversation",
        "Crime, Drama",
        "A surveillance expert has a crisis of conscience",
        "Gene Hackman",
    );
    bad.artwork_url = Some("posters/local/conversation.jpg".to_string());
    store.add_item(bad).unwrap();

    let service = RecommendationService::new();
    let recs = service.recommend(&store.snapshot(), "The Godfather", &HashSet::new(), 10);

    assert!(recs.iter().all(|item| item.id != 6));
    assert!(recs.iter().all(|item| item.has_displayable_artwork()));
}

#[test]
fn personalized_feed_follows_watch_history() {
    let store = create_test_catalogue();
    let service = RecommendationService::new();

    let mut history = WatchHistory::new();
    history.record_watch(7, 5, 100);
    history.record_watch(7, 1, 250); // most recent watch: "Alien"

    let mut feedback = FeedbackStore::new();
    feedback.add_not_interested(7, 2); // dismissed "Aliens"

    let recs = service.because_you_watched(&store.snapshot(), &history, &feedback, 7, 3);
    assert!(!recs.is_empty());
    assert!(recs.iter().all(|item| item.id != 1), "seed is excluded");
    assert!(recs.iter().all(|item| item.id != 2), "feedback is honoured");
}

#[test]
fn fallback_ranker_produces_usable_results() {
    let store = create_test_catalogue();
    // Both strategies set to the fallback, as a degraded deployment
    // would run
    let service = RecommendationService::with_rankers(
        GenreOverlapRanker::with_seed(42),
        GenreOverlapRanker::with_seed(42),
    );

    let recs = service.recommend(&store.snapshot(), "The Godfather", &HashSet::new(), 3);
    assert_eq!(recs.len(), 3);
    // Goodfellas shares "Crime, Drama" verbatim and must be a match
    assert!(recs.iter().any(|item| item.title == "Goodfellas"));
    assert!(recs.iter().all(|item| item.title != "The Godfather"));
}

#[test]
fn service_is_safe_to_share_across_threads() {
    use std::sync::Arc;
    use std::thread;

    let store = create_test_catalogue();
    let snapshot = store.snapshot();
    let service = Arc::new(RecommendationService::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            let snapshot = snapshot.clone();
            let seed = if i % 2 == 0 { "Alien" } else { "Goodfellas" };
            thread::spawn(move || service.recommend(&snapshot, seed, &HashSet::new(), 3))
        })
        .collect();

    for handle in handles {
        let recs = handle.join().unwrap();
        assert!(!recs.is_empty());
    }
}

#[test]
fn shared_ranker_serves_alternating_snapshots() {
    let mut store = create_test_catalogue();
    let old_snapshot = store.snapshot();
    store
        .add_item(record(
            6,
            "Casino",
            "Crime, Drama",
            "Greed and power in Las Vegas",
            "Robert De Niro, Joe Pesci",
        ))
        .unwrap();
    let new_snapshot = store.snapshot();

    let ranker = TfidfCosineRanker::new();
    let seed = new_snapshot.find_by_title("Goodfellas").unwrap();

    // The cache follows whichever generation is asked for; both views
    // stay internally consistent.
    let old_ranking = ranker.rank(&old_snapshot, seed, 10).unwrap();
    let new_ranking = ranker.rank(&new_snapshot, seed, 10).unwrap();
    assert_eq!(old_ranking.len(), old_snapshot.len() - 1);
    assert_eq!(new_ranking.len(), new_snapshot.len() - 1);
    assert!(new_ranking.iter().any(|c| c.item_id == 6));
    assert!(old_ranking.iter().all(|c| c.item_id != 6));
}
