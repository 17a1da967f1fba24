use std::collections::HashSet;

use async_channel::{Receiver, Sender};
use futures::future::join_all;

use crate::engine::geometry::neighborhood;
use crate::entities::{Candidate, Edge, Neighborhood};
use crate::external::NearbySearch;

/// Searches the neighborhood of every edge and merges the hits, keeping the
/// first occurrence of each place id.
///
/// Up to `concurrency` searches run at once. Hits are merged only after every
/// search has finished, in edge order, so the result does not depend on
/// which search returns first. A failed search skips its edge.
#[tracing::instrument(skip_all, fields(edges = edges.len(), concurrency = concurrency))]
pub async fn aggregate_candidates(
    search: &(dyn NearbySearch + Send + Sync),
    edges: &[Edge],
    tags: &[String],
    concurrency: usize,
) -> Vec<Candidate> {
    if edges.is_empty() {
        return vec![];
    }

    let (tx, rx): (Sender<(usize, Neighborhood)>, Receiver<(usize, Neighborhood)>) =
        async_channel::unbounded();

    for job in edges.iter().map(neighborhood).enumerate() {
        if tx.send(job).await.is_err() {
            break;
        }
    }
    drop(tx);

    let workers = (0..concurrency.clamp(1, edges.len())).map(|_| {
        let rx = rx.clone();

        async move {
            let mut hits = vec![];
            while let Ok((index, area)) = rx.recv().await {
                let result = search.search_nearby(&area.center, area.radius, tags).await;
                hits.push((index, area, result));
            }
            hits
        }
    });

    let mut hits: Vec<_> = join_all(workers).await.into_iter().flatten().collect();
    hits.sort_by_key(|(index, _, _)| *index);

    let mut seen = HashSet::new();
    let mut candidates = vec![];

    for (index, area, result) in hits {
        match result {
            Ok(found) => {
                tracing::debug!(edge = index, hits = found.len(), "nearby search finished");
                candidates.extend(found.into_iter().filter(|c| seen.insert(c.place_id.clone())));
            }
            Err(err) => {
                tracing::warn!(edge = index, radius = area.radius, %err, "nearby search failed, skipping edge");
            }
        }
    }

    tracing::info!(candidates = candidates.len(), "aggregated candidates");

    candidates
}
