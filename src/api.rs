use async_trait::async_trait;
use std::sync::Arc;

use crate::entities::{GeocodeResult, OptimizedRoute, RecommendRequest, Recommendation};
use crate::error::Error;

#[async_trait]
pub trait RecommendAPI {
    /// Geocodes the requested anchors and returns the best places around
    /// the skeleton connecting them.
    async fn recommend(&self, request: RecommendRequest) -> Result<Recommendation, Error>;
}

#[async_trait]
pub trait RouteAPI {
    /// Resolves `place_ids` and reorders the stops between the first and the
    /// last into the optimizer's visiting order.
    async fn optimize_route(&self, place_ids: Vec<String>) -> Result<OptimizedRoute, Error>;
}

#[async_trait]
pub trait GeocodeAPI {
    /// Looks up the place id and coordinates behind a place name.
    async fn geocode_place(&self, place_name: &str) -> Result<GeocodeResult, Error>;
}

pub trait API: RecommendAPI + RouteAPI + GeocodeAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
