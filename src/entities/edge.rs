use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

/// A spanning tree connection between two anchors, weighted in meters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: Coordinates,
    pub to: Coordinates,
    pub distance: f64,
}

/// Search circle derived from an edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub center: Coordinates,
    pub radius: f64,
}
