use super::Engine;

use async_trait::async_trait;

use crate::{
    api::GeocodeAPI,
    entities::GeocodeResult,
    error::{invalid_input_error, place_not_found_error, Error},
};

#[async_trait]
impl GeocodeAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn geocode_place(&self, place_name: &str) -> Result<GeocodeResult, Error> {
        let name = place_name.trim();
        if name.is_empty() {
            return Err(invalid_input_error("place_name is empty"));
        }

        let place = self
            .collaborators
            .geocoder
            .geocode(name)
            .await?
            .filter(|place| !place.place_id.is_empty())
            .ok_or_else(|| place_not_found_error(name))?;

        Ok(GeocodeResult {
            place_id: place.place_id,
            lat: place.coordinates.latitude,
            lng: place.coordinates.longitude,
            name: name.to_string(),
        })
    }
}
