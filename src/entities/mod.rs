mod candidate;
mod edge;
mod geocoding;
mod location;
mod recommendation;
mod route;

pub use candidate::{Candidate, PlaceDetails, ScoredCandidate};
pub use edge::{Edge, Neighborhood};
pub use geocoding::{GeocodeRequest, GeocodeResult};
pub use location::Coordinates;
pub use recommendation::{RecommendRequest, Recommendation, RecommendedPlace};
pub use route::{OptimizedOrder, OptimizedRoute, RouteLeg, RoutePlace, RouteSummary};
