use super::{reconcile_route, Engine};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use futures::future::try_join_all;

use crate::{
    api::RouteAPI,
    entities::{OptimizedRoute, RoutePlace, RouteSummary},
    error::{no_places_error, upstream_error, Error},
};

impl Engine {
    /// Every stop has to resolve; a route with holes is not a route.
    #[tracing::instrument(skip(self))]
    async fn resolve_route_places(&self, place_ids: &[String]) -> Result<Vec<RoutePlace>, Error> {
        let lookups = place_ids.iter().enumerate().map(|(index, place_id)| async move {
            let details = self
                .collaborators
                .place_details
                .place_details(place_id, None)
                .await
                .map_err(|err| {
                    tracing::warn!(index, %place_id, %err, "place details lookup failed");
                    err
                })?;

            let coordinates = details.coordinates.ok_or_else(upstream_error)?;

            Ok::<_, Error>(RoutePlace {
                place_id: details.place_id,
                name: details.name,
                coordinates,
                rating: details.rating,
                address: details.address,
                photo_url: details.photo_url,
            })
        });

        try_join_all(lookups).await
    }
}

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn optimize_route(&self, place_ids: Vec<String>) -> Result<OptimizedRoute, Error> {
        if place_ids.is_empty() {
            return Err(no_places_error());
        }

        let places = self.resolve_route_places(&place_ids).await?;
        let m = places.len();

        if m < 2 {
            return Ok(OptimizedRoute {
                places,
                route: RouteSummary::default(),
            });
        }

        let origin = &places[0].coordinates;
        let destination = &places[m - 1].coordinates;
        let intermediates: Vec<_> = places[1..m - 1]
            .iter()
            .map(|place| place.coordinates.clone())
            .collect();

        let order = self
            .collaborators
            .route_optimizer
            .compute_optimized_order(origin, destination, &intermediates, Utc::now() + Duration::hours(1))
            .await?;

        // reconcile positions rather than places so the effective order can be reported
        let positions: Vec<usize> = (0..m).collect();
        let visit = reconcile_route(&positions, Some(order.permutation.as_slice()))?;

        let optimized_order = visit[1..m - 1].iter().map(|position| position - 1).collect();
        let places = visit.iter().map(|&position| places[position].clone()).collect();

        Ok(OptimizedRoute {
            places,
            route: RouteSummary {
                legs: order.legs,
                distance_meters: order.distance_meters,
                duration: order.duration,
                optimized_order,
            },
        })
    }
}
