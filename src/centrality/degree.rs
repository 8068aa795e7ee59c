//! Degree counts and normalised degree centrality

use crate::graph::StationGraph;

/// Per-station degree values, indexed by node
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeScores {
    pub in_degree: Vec<usize>,
    pub out_degree: Vec<usize>,

    /// Distinct neighbours (either direction) over the n - 1 possible ones
    pub centrality: Vec<f64>,
}

/// Compute in/out edge counts and degree centrality in O(E)
pub fn degree_scores(graph: &StationGraph) -> DegreeScores {
    let n = graph.node_count();
    let undirected = graph.undirected_projection();

    let centrality = if n <= 1 {
        vec![1.0; n]
    } else {
        let scale = 1.0 / (n - 1) as f64;
        (0..n).map(|node| undirected.degree(node) as f64 * scale).collect()
    };

    DegreeScores {
        in_degree: (0..n).map(|node| graph.in_degree(node)).collect(),
        out_degree: (0..n).map(|node| graph.out_degree(node)).collect(),
        centrality,
    }
}
