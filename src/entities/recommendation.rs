use serde::{Deserialize, Serialize};

use crate::entities::ScoredCandidate;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub must_places: Vec<String>,
    #[serde(default)]
    pub interest_tags: Vec<String>,
    #[serde(default)]
    pub start_place: Option<String>,
    #[serde(default)]
    pub goal_place: Option<String>,
}

/// Outward representation of a selected candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendedPlace {
    pub place_id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub relevance_score: f64,
}

impl From<ScoredCandidate> for RecommendedPlace {
    fn from(scored: ScoredCandidate) -> Self {
        let ScoredCandidate {
            candidate,
            score,
            details,
        } = scored;

        match details {
            Some(details) => {
                let coordinates = details.coordinates.unwrap_or(candidate.coordinates);

                Self {
                    place_id: details.place_id,
                    name: details.name,
                    lat: coordinates.latitude,
                    lng: coordinates.longitude,
                    photo_url: details.photo_url,
                    rating: details.rating,
                    review_summary: details.review_summary,
                    category: details.category,
                    address: details.address,
                    relevance_score: score,
                }
            }
            None => Self {
                place_id: candidate.place_id,
                name: candidate.name,
                lat: candidate.coordinates.latitude,
                lng: candidate.coordinates.longitude,
                photo_url: None,
                rating: candidate.rating,
                review_summary: None,
                category: None,
                address: None,
                relevance_score: score,
            },
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Recommendation {
    pub places: Vec<RecommendedPlace>,
    pub max_possible_score: f64,
}
