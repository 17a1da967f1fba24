use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// A point of interest surfaced by a nearby search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub place_id: String,
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub photo_reference: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    /// Interest tags whose search returned this place.
    #[serde(default)]
    pub matched_tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
    pub details: Option<PlaceDetails>,
}

impl ScoredCandidate {
    pub fn new(candidate: Candidate, score: f64) -> Self {
        Self {
            candidate,
            score,
            details: None,
        }
    }

    pub fn rating(&self) -> f64 {
        self.candidate.rating
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    pub coordinates: Option<Coordinates>,
    pub rating: f64,
    pub address: Option<String>,
    pub category: Option<String>,
    pub review_summary: Option<String>,
    pub photo_url: Option<String>,
}
