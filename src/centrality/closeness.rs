//! Weighted closeness centrality on the undirected projection

use rayon::prelude::*;

use crate::graph::traversal::dijkstra;
use crate::graph::UndirectedGraph;

/// Closeness score per node index.
///
/// Uses the Wasserman-Faust form so stations in small components are not
/// over-rewarded: `((r - 1) / total) * ((r - 1) / (n - 1))`, where `r`
/// counts reachable stations including the source and `total` is the sum
/// of weighted distances to them.
pub fn closeness_centrality(graph: &UndirectedGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }

    (0..n)
        .into_par_iter()
        .map(|node| {
            let paths = dijkstra(graph.adjacency(), node);
            let (reachable, total) = paths
                .dist
                .iter()
                .flatten()
                .fold((0usize, 0u64), |(count, sum), &d| (count + 1, sum + d));

            if total == 0 {
                return 0.0;
            }
            let others = (reachable - 1) as f64;
            (others / total as f64) * (others / (n - 1) as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, StationGraph};

    #[test]
    fn weights_act_as_distances() {
        // Undirected weights: A-B 2, B-C 4
        let graph = StationGraph::from_edges(vec![
            Edge::new("A", "B", 1),
            Edge::new("B", "A", 1),
            Edge::new("B", "C", 4),
        ])
        .unwrap();

        let scores = closeness_centrality(graph.undirected_projection());

        assert!((scores[0] - 2.0 / 8.0).abs() < 1e-12);
        assert!((scores[1] - 2.0 / 6.0).abs() < 1e-12);
        assert!((scores[2] - 2.0 / 10.0).abs() < 1e-12);
    }

    #[test]
    fn small_components_are_scaled_down() {
        let graph = StationGraph::from_edges(vec![
            Edge::new("A", "B", 1),
            Edge::new("C", "D", 1),
        ])
        .unwrap();

        let scores = closeness_centrality(graph.undirected_projection());

        // One reachable neighbour at distance 1, scaled by 1 / 3.
        for score in scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-12);
        }
    }
}
