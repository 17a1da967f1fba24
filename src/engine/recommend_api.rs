use super::{max_possible_score, Engine};

use async_trait::async_trait;

use crate::{
    api::RecommendAPI,
    entities::{Coordinates, RecommendRequest, Recommendation, RecommendedPlace},
    error::{invalid_input_error, place_not_found_error, Error},
};

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Engine {
    /// Start and goal must resolve; their lookup failures are the caller's.
    #[tracing::instrument(skip(self))]
    async fn resolve_anchor(&self, name: &str) -> Result<Coordinates, Error> {
        self.collaborators
            .geocoder
            .geocode(name)
            .await?
            .map(|place| Coordinates::labelled(place.coordinates.latitude, place.coordinates.longitude, name))
            .ok_or_else(|| place_not_found_error(name))
    }

    /// Must-visit places that cannot be resolved are left out.
    #[tracing::instrument(skip(self))]
    async fn resolve_must_places(&self, names: &[String]) -> Vec<Coordinates> {
        let mut resolved = vec![];

        for name in names {
            match self.resolve_anchor(name).await {
                Ok(coordinates) => resolved.push(coordinates),
                Err(err) => tracing::warn!(%name, %err, "skipping must-visit place"),
            }
        }

        resolved
    }
}

#[async_trait]
impl RecommendAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn recommend(&self, request: RecommendRequest) -> Result<Recommendation, Error> {
        let RecommendRequest {
            must_places,
            interest_tags,
            start_place,
            goal_place,
        } = request;

        if must_places.is_empty() {
            return Err(invalid_input_error("must_places is empty"));
        }
        if interest_tags.is_empty() {
            return Err(invalid_input_error("interest_tags is empty"));
        }

        let start_name =
            non_blank(start_place).unwrap_or_else(|| self.settings.default_start_place.clone());
        let start = self.resolve_anchor(&start_name).await?;

        let goal = match non_blank(goal_place) {
            Some(name) => self.resolve_anchor(&name).await?,
            None => start.clone(),
        };

        let mut anchors = vec![start];
        anchors.extend(self.resolve_must_places(&must_places).await);
        anchors.push(goal);

        let selected = self.generate_recommendations(&anchors, &interest_tags).await?;
        let enriched = self.enrich(selected).await;

        Ok(Recommendation {
            places: enriched.into_iter().map(RecommendedPlace::from).collect(),
            max_possible_score: max_possible_score(&interest_tags, &self.vocabulary),
        })
    }
}
