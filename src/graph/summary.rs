//! Whole-network structural statistics

use serde::{Deserialize, Serialize};

use crate::graph::StationGraph;

/// Structural summary of a station graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub is_strongly_connected: bool,
    pub is_weakly_connected: bool,

    /// Longest hop distance in the undirected projection; absent when disconnected
    pub diameter: Option<u32>,

    /// Mean hop distance in the undirected projection; absent when disconnected
    pub avg_shortest_path: Option<f64>,
}

impl NetworkSummary {
    pub fn from_graph(graph: &StationGraph) -> Self {
        let path_stats = graph.diameter_and_avg_path();

        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            density: graph.density(),
            is_strongly_connected: graph.is_strongly_connected(),
            is_weakly_connected: graph.is_weakly_connected(),
            diameter: path_stats.map(|(diameter, _)| diameter),
            avg_shortest_path: path_stats.map(|(_, avg)| avg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    #[test]
    fn disconnected_graph_omits_path_statistics() {
        let graph = StationGraph::from_edges(vec![
            Edge::new("A", "B", 1),
            Edge::new("B", "A", 1),
            Edge::new("C", "D", 2),
        ])
        .unwrap();

        let summary = NetworkSummary::from_graph(&graph);

        assert_eq!(summary.node_count, 4);
        assert_eq!(summary.edge_count, 3);
        assert!(!summary.is_weakly_connected);
        assert!(!summary.is_strongly_connected);
        assert_eq!(summary.diameter, None);
        assert_eq!(summary.avg_shortest_path, None);
    }
}
