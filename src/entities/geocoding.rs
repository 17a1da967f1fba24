use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeRequest {
    #[serde(default)]
    pub place_name: String,
}

/// A place name resolved to the id routes are built from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub place_id: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}
