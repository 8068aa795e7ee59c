//! Weighted modularity of a partition

use crate::graph::UndirectedGraph;

/// `Q = Σ_c [ L_c / m - (D_c / 2m)² ]`
///
/// `L_c` is the edge weight inside community `c`, `D_c` the weighted degree
/// of its members and `m` the total edge weight. An empty graph scores 0.
pub fn modularity(graph: &UndirectedGraph, labels: &[usize]) -> f64 {
    let m = graph.total_weight() as f64;
    if m == 0.0 {
        return 0.0;
    }

    let community_count = labels.iter().max().map_or(0, |&max| max + 1);
    let mut internal = vec![0.0_f64; community_count];
    let mut degree = vec![0.0_f64; community_count];

    for (node, &label) in labels.iter().enumerate() {
        degree[label] += graph.weighted_degree(node) as f64;
        for (other, weight) in graph.neighbors(node) {
            if node < other && labels[other] == label {
                internal[label] += weight as f64;
            }
        }
    }

    internal
        .iter()
        .zip(&degree)
        .map(|(l, d)| l / m - (d / (2.0 * m)).powi(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, StationGraph};

    #[test]
    fn singletons_score_negative_and_whole_graph_scores_zero() {
        let graph = StationGraph::from_edges(vec![Edge::new("A", "B", 1), Edge::new("B", "C", 1)]).unwrap();
        let undirected = graph.undirected_projection();

        // Degrees 1, 2, 1 out of 2m = 4.
        let singletons = modularity(undirected, &[0, 1, 2]);
        assert!((singletons - -(1.0 + 4.0 + 1.0) / 16.0).abs() < 1e-12);

        assert!(modularity(undirected, &[0, 0, 0]).abs() < 1e-12);
    }

    #[test]
    fn disjoint_pairs_split_cleanly() {
        let graph = StationGraph::from_edges(vec![Edge::new("A", "B", 1), Edge::new("C", "D", 1)]).unwrap();

        let q = modularity(graph.undirected_projection(), &[0, 0, 1, 1]);

        assert!((q - 0.5).abs() < 1e-12);
    }
}
