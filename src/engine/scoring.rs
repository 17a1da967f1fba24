use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::Candidate;
use crate::error::Error;

pub const TAG_MATCH_WEIGHT: f64 = 10.0;
pub const PRIMARY_TYPE_BONUS: f64 = 20.0;
pub const SECONDARY_TYPE_BONUS: f64 = 15.0;
pub const GENERIC_TYPE_BONUS: f64 = 5.0;
pub const RATING_WEIGHT: f64 = 0.5;
pub const MAX_RATING: f64 = 5.0;

/// Maps an interest tag to the place types expected for it, most specific
/// first. Built once at startup and shared read-only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagVocabulary {
    entries: HashMap<String, Vec<String>>,
}

impl TagVocabulary {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        let table: [(&str, &[&str]); 10] = [
            ("カフェ", &["cafe", "cafe", "food", "point_of_interest", "establishment"]),
            ("レストラン", &["restaurant", "food", "point_of_interest", "establishment"]),
            ("神社", &["shrine", "place_of_worship", "point_of_interest", "establishment"]),
            ("寺", &["temple", "place_of_worship", "point_of_interest", "establishment"]),
            ("公園", &["park", "point_of_interest", "establishment"]),
            ("自然", &["park", "natural_feature", "point_of_interest", "establishment"]),
            ("観光", &["tourist_attraction", "tourist_attraction", "point_of_interest", "establishment"]),
            ("ショッピング", &["shopping_mall", "store", "point_of_interest", "establishment"]),
            ("博物館", &["museum", "point_of_interest", "establishment"]),
            ("美術館", &["art_gallery", "museum", "point_of_interest", "establishment"]),
        ];

        table
            .iter()
            .map(|(tag, types)| {
                (
                    tag.to_string(),
                    types.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect()
    }

    /// Loads a `{"tag": ["type", ...]}` JSON document.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        let vocabulary: Self = serde_json::from_str(&raw)?;

        tracing::info!(tags = vocabulary.entries.len(), "loaded tag vocabulary");

        Ok(vocabulary)
    }

    pub fn expected_types(&self, tag: &str) -> Option<&[String]> {
        self.entries.get(tag).map(Vec::as_slice)
    }

    /// The type a nearby search should filter on for `tag`, if known.
    pub fn primary_type(&self, tag: &str) -> Option<&str> {
        self.expected_types(tag)
            .and_then(|types| types.first())
            .map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for TagVocabulary {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Relevance of `candidate` to the requested interest tags:
/// `10 * matched tags + type bonuses + 0.5 * rating`.
pub fn relevance_score(candidate: &Candidate, tags: &[String], vocabulary: &TagVocabulary) -> f64 {
    let found_under = candidate.matched_tags.len() as f64 * TAG_MATCH_WEIGHT;

    let type_bonus: f64 = tags
        .iter()
        .filter_map(|tag| vocabulary.expected_types(tag))
        .map(|expected| type_match_bonus(&candidate.types, expected))
        .sum();

    found_under + type_bonus + candidate.rating.max(0.0) * RATING_WEIGHT
}

/// One award per tag, the strongest tier that applies.
fn type_match_bonus(types: &[String], expected: &[String]) -> f64 {
    let has = |t: &String| types.iter().any(|candidate_type| candidate_type == t);

    match expected {
        [] => 0.0,
        [primary, ..] if has(primary) => PRIMARY_TYPE_BONUS,
        [_, secondary, ..] if has(secondary) => SECONDARY_TYPE_BONUS,
        [_, _, generic @ ..] if generic.iter().any(has) => GENERIC_TYPE_BONUS,
        _ => 0.0,
    }
}

/// Upper bound of [`relevance_score`] for a five star place that was found
/// under every tag and matched each known tag on its primary type.
pub fn max_possible_score(tags: &[String], vocabulary: &TagVocabulary) -> f64 {
    let known = tags.iter().filter(|tag| vocabulary.contains(tag)).count() as f64;

    tags.len() as f64 * TAG_MATCH_WEIGHT + known * PRIMARY_TYPE_BONUS + MAX_RATING * RATING_WEIGHT
}
