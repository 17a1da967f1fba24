use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// A stop on a route. Position in the list decides its role: first is the
/// origin, last is the destination, everything in between may be reordered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePlace {
    pub place_id: String,
    pub name: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub start_location: Coordinates,
    pub end_location: Coordinates,
    pub distance_meters: u64,
    pub duration: String,
}

/// What the route optimizer hands back: legs in travel order plus the
/// visiting order over the intermediates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizedOrder {
    pub legs: Vec<RouteLeg>,
    pub distance_meters: u64,
    pub duration: String,
    pub permutation: Vec<usize>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteSummary {
    pub legs: Vec<RouteLeg>,
    pub distance_meters: u64,
    pub duration: String,
    pub optimized_order: Vec<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptimizedRoute {
    pub places: Vec<RoutePlace>,
    pub route: RouteSummary,
}
