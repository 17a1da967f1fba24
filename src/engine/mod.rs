mod aggregate;
mod geocode_api;
mod geometry;
mod recommend_api;
mod reconcile;
mod route_api;
mod scoring;
mod selection;
mod spanning;

pub use aggregate::aggregate_candidates;
pub use geometry::{haversine_distance, neighborhood, search_radius, EARTH_RADIUS_METERS};
pub use reconcile::reconcile_route;
pub use scoring::{max_possible_score, relevance_score, TagVocabulary};
pub use selection::{Ranking, SelectionPolicy};
pub use spanning::minimum_spanning_tree;

use std::sync::Arc;

use futures::future::join_all;

use crate::{
    api::API,
    config::Config,
    entities::{Coordinates, ScoredCandidate},
    error::{no_anchors_error, Error},
    external::{
        google_maps::GoogleMaps, DynGeocoder, DynNearbySearch, DynPlaceDetailsLookup,
        DynRouteOptimizer,
    },
};

/// The remote lookups an [`Engine`] depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub geocoder: DynGeocoder,
    pub nearby_search: DynNearbySearch,
    pub place_details: DynPlaceDetailsLookup,
    pub route_optimizer: DynRouteOptimizer,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub selection_policy: SelectionPolicy,
    pub search_concurrency: usize,
    pub default_start_place: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selection_policy: SelectionPolicy::default(),
            search_concurrency: 4,
            default_start_place: crate::config::DEFAULT_START_PLACE.into(),
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            selection_policy: config.selection_policy,
            search_concurrency: config.search_concurrency,
            default_start_place: config.default_start_place.clone(),
        }
    }
}

pub struct Engine {
    collaborators: Collaborators,
    vocabulary: Arc<TagVocabulary>,
    settings: Settings,
}

impl Engine {
    pub fn new(collaborators: Collaborators, vocabulary: Arc<TagVocabulary>, settings: Settings) -> Self {
        Self {
            collaborators,
            vocabulary,
            settings,
        }
    }

    /// Wires every collaborator to the Google Maps Platform.
    #[tracing::instrument(name = "Engine::from_config", skip_all)]
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let vocabulary = config.load_vocabulary()?;
        let google = Arc::new(GoogleMaps::new(config, vocabulary.clone()));

        let collaborators = Collaborators {
            geocoder: google.clone(),
            nearby_search: google.clone(),
            place_details: google.clone(),
            route_optimizer: google,
        };

        Ok(Self::new(collaborators, vocabulary, config.into()))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocabulary
    }

    /// Ranked candidates around the spanning tree of `anchors`.
    ///
    /// Fails only when `anchors` is empty. Search failures shrink the result
    /// instead of failing it.
    #[tracing::instrument(skip(self, anchors), fields(anchors = anchors.len()))]
    pub async fn generate_recommendations(
        &self,
        anchors: &[Coordinates],
        interest_tags: &[String],
    ) -> Result<Vec<ScoredCandidate>, Error> {
        if anchors.is_empty() {
            return Err(no_anchors_error());
        }

        let edges = minimum_spanning_tree(anchors);

        let candidates = aggregate_candidates(
            self.collaborators.nearby_search.as_ref(),
            &edges,
            interest_tags,
            self.settings.search_concurrency,
        )
        .await;

        let scored = candidates
            .into_iter()
            .map(|candidate| {
                let score = relevance_score(&candidate, interest_tags, &self.vocabulary);
                ScoredCandidate::new(candidate, score)
            })
            .collect();

        let selected = self.settings.selection_policy.select(scored);

        tracing::info!(selected = selected.len(), "selected candidates");

        Ok(selected)
    }

    /// Attaches place details to each candidate. A failed lookup leaves that
    /// candidate with its search fields only.
    #[tracing::instrument(skip_all, fields(candidates = candidates.len()))]
    pub async fn enrich(&self, candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        let lookups = candidates.into_iter().map(|mut scored| async move {
            let lookup = self
                .collaborators
                .place_details
                .place_details(
                    &scored.candidate.place_id,
                    scored.candidate.photo_reference.as_deref(),
                )
                .await;

            match lookup {
                Ok(details) => scored.details = Some(details),
                Err(err) => tracing::warn!(
                    place_id = %scored.candidate.place_id,
                    %err,
                    "place details lookup failed, using search fields"
                ),
            }

            scored
        });

        join_all(lookups).await
    }
}

impl API for Engine {}
