use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::{GeocodedPlace, Geocoder, NearbySearch, PlaceDetailsLookup, RouteOptimizer};
use crate::{
    config::Config,
    engine::TagVocabulary,
    entities::{Candidate, Coordinates, OptimizedOrder, PlaceDetails, RouteLeg},
    error::{invalid_input_error, upstream_error, Error},
};

const REVIEW_SUMMARY_CHARS: usize = 100;
const PHOTO_MAX_WIDTH: u32 = 400;
const DETAIL_FIELDS: &str = "place_id,name,rating,formatted_address,geometry,types,reviews";
const ROUTE_FIELD_MASK: &str =
    "routes.duration,routes.distanceMeters,routes.legs,routes.optimizedIntermediateWaypointIndex";

/// Google Maps Platform client covering geocoding (text search), nearby
/// search, place details and the Routes API.
#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_key: String,
    places_api_base: String,
    routes_api_base: String,
    language: String,
    region_hint: Option<String>,
    travel_mode: String,
    vocabulary: Arc<TagVocabulary>,
}

impl GoogleMaps {
    pub fn new(config: &Config, vocabulary: Arc<TagVocabulary>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.google_maps_api_key.clone(),
            places_api_base: config.places_api_base.clone(),
            routes_api_base: config.routes_api_base.clone(),
            language: config.language.clone(),
            region_hint: config.region_hint.clone(),
            travel_mode: config.travel_mode.clone(),
            vocabulary,
        }
    }

    fn places_url(&self, endpoint: &str) -> String {
        format!("https://{}/maps/api/place/{}/json", self.places_api_base, endpoint)
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        format!(
            "https://{}/maps/api/place/photo?maxwidth={}&photoreference={}&key={}",
            self.places_api_base, PHOTO_MAX_WIDTH, photo_reference, self.api_key
        )
    }

    /// Sends a Places request and returns the decoded body once both the
    /// HTTP status and the API status say it succeeded.
    async fn fetch_places<T>(&self, request: reqwest::RequestBuilder) -> Result<Response<T>, Error>
    where
        T: for<'de> Deserialize<'de>,
    {
        let res = request
            .query(&[("key", &self.api_key)])
            .query(&[("language", &self.language)])
            .send()
            .await?;

        check_status(res.status().as_u16())?;

        let data: Response<T> = res.json().await?;

        if !(data.status == "OK" || data.status == "ZERO_RESULTS") {
            tracing::warn!(
                status = %data.status,
                message = data.error_message.as_deref().unwrap_or(""),
                "places api returned an error status"
            );
            return Err(upstream_error());
        }

        Ok(data)
    }

    /// Search by place type when the tag is in the vocabulary, by keyword
    /// otherwise.
    fn search_filter(&self, tag: &str) -> (&'static str, String) {
        match self.vocabulary.primary_type(tag) {
            Some(place_type) => ("type", place_type.to_string()),
            None => ("keyword", tag.to_string()),
        }
    }
}

fn check_status(status_code: u16) -> Result<(), Error> {
    if (400..500).contains(&status_code) {
        return Err(invalid_input_error("request rejected by the maps api"));
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    Ok(())
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    result: Option<T>,
    results: Option<T>,
    error_message: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    location: Coordinates,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Photo {
    photo_reference: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Review {
    text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TextSearchResult {
    place_id: String,
    name: String,
    geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    rating: Option<f64>,
    geometry: Geometry,
    #[serde(default)]
    photos: Vec<Photo>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DetailsResult {
    place_id: String,
    name: String,
    rating: Option<f64>,
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    reviews: Vec<Review>,
}

#[async_trait]
impl Geocoder for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, name: &str) -> Result<Option<GeocodedPlace>, Error> {
        let query = match &self.region_hint {
            Some(hint) => format!("{} {}", name, hint),
            None => name.to_string(),
        };

        let request = self
            .client
            .get(self.places_url("textsearch"))
            .query(&[("query", query)]);

        let data: Response<Vec<TextSearchResult>> = self.fetch_places(request).await?;

        let first = data.results.and_then(|results| results.into_iter().next());

        Ok(first.map(|place| GeocodedPlace {
            place_id: place.place_id,
            coordinates: Coordinates::labelled(
                place.geometry.location.latitude,
                place.geometry.location.longitude,
                name,
            ),
        }))
    }
}

#[async_trait]
impl NearbySearch for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn search_nearby(
        &self,
        center: &Coordinates,
        radius: f64,
        tags: &[String],
    ) -> Result<Vec<Candidate>, Error> {
        let location: String = center.clone().into();

        let mut candidates: Vec<Candidate> = vec![];
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut failures = 0;

        for tag in tags {
            let (filter, value) = self.search_filter(tag);

            let request = self
                .client
                .get(self.places_url("nearbysearch"))
                .query(&[("location", &location)])
                .query(&[("radius", format!("{:.0}", radius))])
                .query(&[(filter, value)]);

            let data: Response<Vec<NearbyResult>> = match self.fetch_places(request).await {
                Ok(data) => data,
                Err(err) => {
                    tracing::warn!(%tag, %err, "nearby search failed for tag");
                    failures += 1;
                    continue;
                }
            };

            for result in data.results.unwrap_or_default() {
                if let Some(&position) = positions.get(&result.place_id) {
                    let matched = &mut candidates[position].matched_tags;
                    if !matched.contains(tag) {
                        matched.push(tag.clone());
                    }
                    continue;
                }

                positions.insert(result.place_id.clone(), candidates.len());
                candidates.push(Candidate {
                    place_id: result.place_id,
                    name: result.name,
                    coordinates: Coordinates::new(
                        result.geometry.location.latitude,
                        result.geometry.location.longitude,
                    ),
                    rating: result.rating.unwrap_or_default(),
                    photo_reference: result.photos.into_iter().next().map(|p| p.photo_reference),
                    types: result.types,
                    matched_tags: vec![tag.clone()],
                });
            }
        }

        if !tags.is_empty() && failures == tags.len() {
            return Err(upstream_error());
        }

        Ok(candidates)
    }
}

#[async_trait]
impl PlaceDetailsLookup for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn place_details(
        &self,
        place_id: &str,
        photo_reference: Option<&str>,
    ) -> Result<PlaceDetails, Error> {
        let request = self
            .client
            .get(self.places_url("details"))
            .query(&[("place_id", place_id), ("fields", DETAIL_FIELDS)]);

        let data: Response<DetailsResult> = self.fetch_places(request).await?;
        let result = data.result.ok_or_else(upstream_error)?;

        Ok(PlaceDetails {
            place_id: result.place_id,
            name: result.name,
            coordinates: result.geometry.map(|g| g.location),
            rating: result.rating.unwrap_or_default(),
            address: result.formatted_address,
            category: result.types.into_iter().next(),
            review_summary: result.reviews.first().map(|r| summarize_review(&r.text)),
            photo_url: photo_reference.map(|reference| self.photo_url(reference)),
        })
    }
}

/// First [`REVIEW_SUMMARY_CHARS`] characters of a review, with an ellipsis
/// when cut.
fn summarize_review(text: &str) -> String {
    match text.char_indices().nth(REVIEW_SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteLocation {
    lat_lng: LatLng,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Waypoint {
    location: RouteLocation,
}

impl From<&Coordinates> for Waypoint {
    fn from(coordinates: &Coordinates) -> Self {
        Self {
            location: RouteLocation {
                lat_lng: LatLng {
                    latitude: coordinates.latitude,
                    longitude: coordinates.longitude,
                },
            },
        }
    }
}

impl From<RouteLocation> for Coordinates {
    fn from(location: RouteLocation) -> Self {
        Coordinates::new(location.lat_lng.latitude, location.lat_lng.longitude)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesRequest {
    origin: Waypoint,
    destination: Waypoint,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    intermediates: Vec<Waypoint>,
    travel_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing_preference: Option<&'static str>,
    optimize_waypoint_order: bool,
    departure_time: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<ComputedRoute>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComputedRoute {
    #[serde(default)]
    legs: Vec<ComputedLeg>,
    #[serde(default)]
    distance_meters: u64,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    optimized_intermediate_waypoint_index: Vec<i64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComputedLeg {
    start_location: RouteLocation,
    end_location: RouteLocation,
    #[serde(default)]
    distance_meters: u64,
    #[serde(default)]
    duration: String,
}

#[async_trait]
impl RouteOptimizer for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn compute_optimized_order(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        intermediates: &[Coordinates],
        departure_time: DateTime<Utc>,
    ) -> Result<OptimizedOrder, Error> {
        let url = format!("https://{}/directions/v2:computeRoutes", self.routes_api_base);

        // traffic aware routing is only accepted for motor vehicles
        let routing_preference = match self.travel_mode.as_str() {
            "DRIVE" | "TWO_WHEELER" => Some("TRAFFIC_AWARE"),
            _ => None,
        };

        let body = ComputeRoutesRequest {
            origin: origin.into(),
            destination: destination.into(),
            intermediates: intermediates.iter().map(Waypoint::from).collect(),
            travel_mode: self.travel_mode.clone(),
            routing_preference,
            optimize_waypoint_order: !intermediates.is_empty(),
            departure_time: departure_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        let res = self
            .client
            .post(url)
            .query(&[("key", &self.api_key)])
            .header("X-Goog-FieldMask", ROUTE_FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        check_status(res.status().as_u16())?;

        let data: ComputeRoutesResponse = res.json().await?;
        let route = data.routes.into_iter().next().ok_or_else(upstream_error)?;

        Ok(OptimizedOrder {
            legs: route
                .legs
                .into_iter()
                .map(|leg| RouteLeg {
                    start_location: leg.start_location.into(),
                    end_location: leg.end_location.into(),
                    distance_meters: leg.distance_meters,
                    duration: leg.duration,
                })
                .collect(),
            distance_meters: route.distance_meters,
            duration: route.duration,
            permutation: route
                .optimized_intermediate_waypoint_index
                .into_iter()
                .filter_map(|index| usize::try_from(index).ok())
                .collect(),
        })
    }
}
