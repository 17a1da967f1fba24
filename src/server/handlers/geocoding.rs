use axum::extract::{Extension, Json};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{GeocodeRequest, GeocodeResult};
use crate::error::Error;

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<GeocodeRequest>,
) -> Result<Json<GeocodeResult>, Error> {
    let place = api.geocode_place(&params.place_name).await?;

    Ok(place.into())
}
