use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::OptimizedRoute;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    places: Vec<String>,
}

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<OptimizedRoute>, Error> {
    let route = api.optimize_route(params.places).await?;

    Ok(route.into())
}
