use axum::extract::{Extension, Json};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{RecommendRequest, Recommendation};
use crate::error::Error;

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<RecommendRequest>,
) -> Result<Json<Recommendation>, Error> {
    let recommendation = api.recommend(params).await?;

    Ok(recommendation.into())
}
