use crate::entities::{Coordinates, Edge, Neighborhood};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters (haversine).
pub fn haversine_distance(a: &Coordinates, b: &Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);

    // rounding can push h a hair outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Search circle for an edge: centered on the averaged endpoints with a
/// radius of `length / sqrt(3)`.
pub fn neighborhood(edge: &Edge) -> Neighborhood {
    let center = Coordinates::new(
        (edge.from.latitude + edge.to.latitude) / 2.0,
        (edge.from.longitude + edge.to.longitude) / 2.0,
    );

    Neighborhood {
        center,
        radius: search_radius(edge.distance),
    }
}

pub fn search_radius(edge_length: f64) -> f64 {
    edge_length / 3f64.sqrt()
}
