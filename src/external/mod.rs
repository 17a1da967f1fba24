//! Lookups the engine delegates to remote services.

pub mod google_maps;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Candidate, Coordinates, OptimizedOrder, PlaceDetails};
use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub place_id: String,
    pub coordinates: Coordinates,
}

#[async_trait]
pub trait Geocoder {
    /// `Ok(None)` when nothing matches `name`.
    async fn geocode(&self, name: &str) -> Result<Option<GeocodedPlace>, Error>;
}

#[async_trait]
pub trait NearbySearch {
    async fn search_nearby(
        &self,
        center: &Coordinates,
        radius: f64,
        tags: &[String],
    ) -> Result<Vec<Candidate>, Error>;
}

#[async_trait]
pub trait PlaceDetailsLookup {
    async fn place_details(
        &self,
        place_id: &str,
        photo_reference: Option<&str>,
    ) -> Result<PlaceDetails, Error>;
}

#[async_trait]
pub trait RouteOptimizer {
    async fn compute_optimized_order(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        intermediates: &[Coordinates],
        departure_time: DateTime<Utc>,
    ) -> Result<OptimizedOrder, Error>;
}

pub type DynGeocoder = std::sync::Arc<dyn Geocoder + Send + Sync>;
pub type DynNearbySearch = std::sync::Arc<dyn NearbySearch + Send + Sync>;
pub type DynPlaceDetailsLookup = std::sync::Arc<dyn PlaceDetailsLookup + Send + Sync>;
pub type DynRouteOptimizer = std::sync::Arc<dyn RouteOptimizer + Send + Sync>;
