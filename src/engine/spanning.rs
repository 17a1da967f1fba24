use petgraph::unionfind::UnionFind;

use crate::engine::geometry::haversine_distance;
use crate::entities::{Coordinates, Edge};

/// Minimum spanning tree over the complete graph of `anchors`, weighted by
/// great-circle distance.
///
/// Candidate edges are enumerated as `(i, j)` with `i < j` and stably sorted,
/// so equal weights keep enumeration order. The result always holds
/// `anchors.len() - 1` edges (or none for fewer than two anchors).
#[tracing::instrument(skip_all, fields(anchors = anchors.len()))]
pub fn minimum_spanning_tree(anchors: &[Coordinates]) -> Vec<Edge> {
    let n = anchors.len();
    if n <= 1 {
        return vec![];
    }

    let mut candidates = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            candidates.push((i, j, haversine_distance(&anchors[i], &anchors[j])));
        }
    }

    candidates.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut components = UnionFind::<usize>::new(n);
    let mut edges = Vec::with_capacity(n - 1);

    for (i, j, distance) in candidates {
        if !components.union(i, j) {
            continue;
        }

        edges.push(Edge {
            from: anchors[i].clone(),
            to: anchors[j].clone(),
            distance,
        });

        if edges.len() == n - 1 {
            break;
        }
    }

    tracing::debug!(
        total_distance = edges.iter().map(|e| e.distance).sum::<f64>(),
        "built spanning tree"
    );

    edges
}
