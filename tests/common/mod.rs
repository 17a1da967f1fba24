#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use stroll::engine::{Collaborators, Engine, Settings, TagVocabulary};
use stroll::entities::{Candidate, Coordinates, OptimizedOrder, PlaceDetails, RouteLeg};
use stroll::error::{upstream_error, Error};
use stroll::external::{GeocodedPlace, Geocoder, NearbySearch, PlaceDetailsLookup, RouteOptimizer};

pub fn candidate(id: &str, rating: f64, types: &[&str], matched_tags: &[&str]) -> Candidate {
    Candidate {
        place_id: id.into(),
        name: format!("place {}", id),
        coordinates: Coordinates::new(33.59, 130.40),
        rating,
        photo_reference: Some(format!("photo-{}", id)),
        types: types.iter().map(|t| t.to_string()).collect(),
        matched_tags: matched_tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// In-memory stand-in for every remote lookup.
#[derive(Default)]
pub struct FakeMaps {
    pub places: HashMap<String, Coordinates>,
    pub failing_geocodes: Vec<String>,
    pub nearby: Vec<Candidate>,
    pub nearby_fails: bool,
    pub failing_details: Vec<String>,
    pub permutation: Vec<usize>,
    pub searches: Mutex<Vec<(Coordinates, f64)>>,
    pub routed: Mutex<Vec<Vec<Coordinates>>>,
}

impl FakeMaps {
    pub fn with_place(mut self, name: &str, latitude: f64, longitude: f64) -> Self {
        self.places
            .insert(name.to_string(), Coordinates::new(latitude, longitude));
        self
    }
}

#[async_trait]
impl Geocoder for FakeMaps {
    async fn geocode(&self, name: &str) -> Result<Option<GeocodedPlace>, Error> {
        if self.failing_geocodes.iter().any(|n| n == name) {
            return Err(upstream_error());
        }

        Ok(self.places.get(name).map(|coordinates| GeocodedPlace {
            place_id: format!("id-{}", name),
            coordinates: coordinates.clone(),
        }))
    }
}

#[async_trait]
impl NearbySearch for FakeMaps {
    async fn search_nearby(
        &self,
        center: &Coordinates,
        radius: f64,
        _tags: &[String],
    ) -> Result<Vec<Candidate>, Error> {
        self.searches.lock().unwrap().push((center.clone(), radius));

        if self.nearby_fails {
            return Err(upstream_error());
        }

        Ok(self.nearby.clone())
    }
}

#[async_trait]
impl PlaceDetailsLookup for FakeMaps {
    async fn place_details(
        &self,
        place_id: &str,
        photo_reference: Option<&str>,
    ) -> Result<PlaceDetails, Error> {
        if self.failing_details.iter().any(|id| id == place_id) {
            return Err(upstream_error());
        }

        let coordinates = self
            .places
            .get(place_id)
            .cloned()
            .unwrap_or_else(|| Coordinates::new(33.59, 130.40));

        Ok(PlaceDetails {
            place_id: place_id.to_string(),
            name: format!("detailed {}", place_id),
            coordinates: Some(coordinates),
            rating: 4.5,
            address: Some("Fukuoka".into()),
            category: Some("cafe".into()),
            review_summary: Some("good".into()),
            photo_url: photo_reference.map(|r| format!("https://photos/{}", r)),
        })
    }
}

#[async_trait]
impl RouteOptimizer for FakeMaps {
    async fn compute_optimized_order(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        intermediates: &[Coordinates],
        _departure_time: DateTime<Utc>,
    ) -> Result<OptimizedOrder, Error> {
        let mut stops = vec![origin.clone()];
        stops.extend(intermediates.iter().cloned());
        stops.push(destination.clone());
        self.routed.lock().unwrap().push(stops.clone());

        Ok(OptimizedOrder {
            legs: stops
                .windows(2)
                .map(|pair| RouteLeg {
                    start_location: pair[0].clone(),
                    end_location: pair[1].clone(),
                    distance_meters: 1000,
                    duration: "300s".into(),
                })
                .collect(),
            distance_meters: 1000 * (stops.len() as u64 - 1),
            duration: format!("{}s", 300 * (stops.len() - 1)),
            permutation: self.permutation.clone(),
        })
    }
}

pub fn engine(maps: Arc<FakeMaps>, settings: Settings) -> Engine {
    let collaborators = Collaborators {
        geocoder: maps.clone(),
        nearby_search: maps.clone(),
        place_details: maps.clone(),
        route_optimizer: maps,
    };

    Engine::new(collaborators, Arc::new(TagVocabulary::builtin()), settings)
}
