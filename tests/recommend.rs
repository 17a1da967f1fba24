mod common;

use std::sync::Arc;

use common::{candidate, engine, FakeMaps};
use stroll::api::RecommendAPI;
use stroll::engine::{SelectionPolicy, Settings};
use stroll::entities::{Coordinates, RecommendRequest};
use tokio_test::block_on;

fn fukuoka() -> FakeMaps {
    FakeMaps::default()
        .with_place("Hakata Station", 33.5902, 130.4207)
        .with_place("Tenjin", 33.5911, 130.3989)
        .with_place("Ohori Park", 33.5860, 130.3764)
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

#[test]
fn three_anchors_produce_a_single_cafe() {
    let maps = Arc::new(FakeMaps {
        nearby: vec![candidate("a", 4.0, &["cafe"], &["カフェ"])],
        ..fukuoka()
    });
    let engine = engine(maps.clone(), Settings::default());

    let anchors = vec![
        Coordinates::labelled(33.5902, 130.4207, "StartX"),
        Coordinates::labelled(33.5911, 130.3989, "MustY"),
        Coordinates::labelled(33.5860, 130.3764, "GoalZ"),
    ];

    let selected = block_on(engine.generate_recommendations(&anchors, &tags(&["カフェ"]))).unwrap();

    assert_eq!(maps.searches.lock().unwrap().len(), 2);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].candidate.place_id, "a");
    assert_eq!(selected[0].score, 32.0);
}

#[test]
fn empty_anchor_set_is_rejected() {
    let engine = engine(Arc::new(fukuoka()), Settings::default());
    let err = block_on(engine.generate_recommendations(&[], &tags(&["カフェ"]))).unwrap_err();
    assert_eq!(err.code, 103);
    assert!(err.is_input_error());
}

#[test]
fn single_anchor_searches_nothing() {
    let maps = Arc::new(fukuoka());
    let engine = engine(maps.clone(), Settings::default());

    let selected = block_on(
        engine.generate_recommendations(&[Coordinates::new(33.59, 130.42)], &tags(&["カフェ"])),
    )
    .unwrap();

    assert!(selected.is_empty());
    assert!(maps.searches.lock().unwrap().is_empty());
}

#[test]
fn search_outage_yields_an_empty_recommendation() {
    let maps = Arc::new(FakeMaps {
        nearby_fails: true,
        ..fukuoka()
    });
    let engine = engine(maps, Settings::default());

    let recommendation = block_on(engine.recommend(RecommendRequest {
        must_places: tags(&["Tenjin"]),
        interest_tags: tags(&["カフェ"]),
        start_place: None,
        goal_place: Some("Ohori Park".into()),
    }))
    .unwrap();

    assert!(recommendation.places.is_empty());
}

#[test]
fn recommend_geocodes_anchors_and_enriches_results() {
    let maps = Arc::new(FakeMaps {
        nearby: vec![
            candidate("weak", 4.9, &["store"], &[]),
            candidate("cafe", 4.0, &["cafe", "food"], &["カフェ"]),
            candidate("shrine", 3.0, &["place_of_worship"], &["神社"]),
            candidate("broken", 4.2, &["cafe"], &["カフェ"]),
        ],
        failing_details: vec!["broken".into()],
        failing_geocodes: vec!["Nowhere".into()],
        ..fukuoka()
    });
    let engine = engine(maps.clone(), Settings::default());

    let recommendation = block_on(engine.recommend(RecommendRequest {
        must_places: tags(&["Tenjin", "Nowhere", "Unknown"]),
        interest_tags: tags(&["カフェ", "神社"]),
        start_place: Some("  ".into()),
        goal_place: Some("Ohori Park".into()),
    }))
    .unwrap();

    // start, Tenjin, goal: two edges
    assert_eq!(maps.searches.lock().unwrap().len(), 2);

    let ids: Vec<_> = recommendation.places.iter().map(|p| p.place_id.as_str()).collect();
    assert_eq!(ids, vec!["broken", "cafe", "shrine"]);

    // lookup failed: search fields only
    assert_eq!(recommendation.places[0].relevance_score, 32.1);
    assert!(recommendation.places[0].address.is_none());
    assert_eq!(recommendation.places[0].rating, 4.2);

    assert_eq!(recommendation.places[1].address.as_deref(), Some("Fukuoka"));
    assert_eq!(recommendation.places[1].photo_url.as_deref(), Some("https://photos/photo-cafe"));
    assert_eq!(recommendation.places[2].relevance_score, 26.5);

    assert_eq!(recommendation.max_possible_score, 20.0 + 40.0 + 2.5);
}

#[test]
fn goal_defaults_to_start() {
    let maps = Arc::new(fukuoka());
    let engine = engine(maps.clone(), Settings::default());

    // the only must-visit place does not resolve, leaving start and goal
    block_on(engine.recommend(RecommendRequest {
        must_places: tags(&["Nowhere"]),
        interest_tags: tags(&["公園"]),
        ..Default::default()
    }))
    .unwrap();

    let searches = maps.searches.lock().unwrap();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].1, 0.0);
}

#[test]
fn unknown_start_is_a_not_found_error() {
    let engine = engine(Arc::new(fukuoka()), Settings::default());

    let err = block_on(engine.recommend(RecommendRequest {
        must_places: tags(&["Tenjin"]),
        interest_tags: tags(&["カフェ"]),
        start_place: Some("Atlantis".into()),
        ..Default::default()
    }))
    .unwrap_err();

    assert_eq!(err.code, 102);
}

#[test]
fn requests_without_must_places_or_tags_are_rejected() {
    let maps = Arc::new(fukuoka());
    let engine = engine(maps.clone(), Settings::default());

    let err = block_on(engine.recommend(RecommendRequest {
        interest_tags: tags(&["カフェ"]),
        ..Default::default()
    }))
    .unwrap_err();
    assert_eq!(err.code, 101);

    let err = block_on(engine.recommend(RecommendRequest {
        must_places: tags(&["Tenjin"]),
        ..Default::default()
    }))
    .unwrap_err();
    assert_eq!(err.code, 101);
    assert!(err.is_input_error());

    assert!(maps.searches.lock().unwrap().is_empty());
}

#[test]
fn rating_only_policy_keeps_low_relevance_places() {
    let nearby = (0..12)
        .map(|i| candidate(&format!("p{}", i), i as f64 * 0.4, &[], &[]))
        .collect();
    let maps = Arc::new(FakeMaps { nearby, ..fukuoka() });
    let settings = Settings {
        selection_policy: SelectionPolicy::rating_only(),
        ..Settings::default()
    };
    let engine = engine(maps, settings);

    let recommendation = block_on(engine.recommend(RecommendRequest {
        must_places: tags(&["Tenjin"]),
        interest_tags: tags(&["カフェ"]),
        ..Default::default()
    }))
    .unwrap();

    assert_eq!(recommendation.places.len(), 10);
    assert_eq!(recommendation.places[0].place_id, "p11");
}
