use geo_types::{Coord, Point};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            label: None,
        }
    }

    pub fn labelled(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: Some(label.into()),
        }
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{:.6},{:.6}", coordinates.latitude, coordinates.longitude)
    }
}

impl From<&Coordinates> for Coord<f64> {
    fn from(coordinates: &Coordinates) -> Self {
        Coord {
            x: coordinates.longitude,
            y: coordinates.latitude,
        }
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::from(Coord::from(&coordinates))
    }
}
