//! Directed weighted station graph

use std::collections::HashMap;

use rayon::prelude::*;

use crate::error::AnalysisError;
use crate::graph::compressed::CompressedAdjacency;
use crate::graph::components::connected_components;
use crate::graph::traversal::{hop_distances, reachable_from};
use crate::graph::{Edge, GraphBuilder, UndirectedGraph};

/// Directed station-to-station movement graph.
///
/// Stations are the union of all edge endpoints, indexed in ascending name
/// order. The graph is immutable once built.
#[derive(Debug, Clone)]
pub struct StationGraph {
    pub(crate) node_ids: Vec<String>,
    pub(crate) id_to_index: HashMap<String, u32>,
    pub(crate) outgoing: CompressedAdjacency,
    pub(crate) incoming: CompressedAdjacency,
    /// Edge metadata in the same order as `outgoing` entries
    pub(crate) edges: Vec<Edge>,
    pub(crate) undirected: UndirectedGraph,
}

impl StationGraph {
    /// Build a graph from aggregated edges
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Result<Self, AnalysisError> {
        GraphBuilder::from_edges(edges).build()
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// edge_count / (n * (n - 1)); zero for graphs with fewer than two stations
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n < 2 {
            return 0.0;
        }
        self.edge_count() as f64 / (n * (n - 1)) as f64
    }

    pub fn station_name(&self, index: usize) -> &str {
        &self.node_ids[index]
    }

    pub fn station_index(&self, name: &str) -> Option<usize> {
        self.id_to_index.get(name).map(|&idx| idx as usize)
    }

    /// Station names in index order
    pub fn stations(&self) -> &[String] {
        &self.node_ids
    }

    /// All edges, ordered by origin then destination index
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge metadata for `origin -> destination`
    pub fn edge(&self, origin: &str, destination: &str) -> Option<&Edge> {
        let src = self.station_index(origin)?;
        let dst = self.station_index(destination)? as u32;
        self.outgoing.position(src, dst).map(|pos| &self.edges[pos])
    }

    pub fn in_degree(&self, node: usize) -> usize {
        self.incoming.degree(node)
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.outgoing.degree(node)
    }

    pub fn outgoing(&self) -> &CompressedAdjacency {
        &self.outgoing
    }

    pub fn incoming(&self) -> &CompressedAdjacency {
        &self.incoming
    }

    /// Every station reachable from every other following edge direction
    pub fn is_strongly_connected(&self) -> bool {
        if self.node_count() == 0 {
            return false;
        }
        reachable_from(&self.outgoing, 0).into_iter().all(|seen| seen)
            && reachable_from(&self.incoming, 0).into_iter().all(|seen| seen)
    }

    /// Every station reachable from every other ignoring direction
    pub fn is_weakly_connected(&self) -> bool {
        if self.node_count() == 0 {
            return false;
        }
        reachable_from(self.undirected.adjacency(), 0)
            .into_iter()
            .all(|seen| seen)
    }

    /// Undirected projection with summed weights
    pub fn undirected_projection(&self) -> &UndirectedGraph {
        &self.undirected
    }

    /// Component label per station in the undirected projection, plus the count
    pub fn weakly_connected_components(&self) -> (Vec<usize>, usize) {
        connected_components(&self.undirected)
    }

    /// Hop diameter and mean hop distance over all ordered station pairs of
    /// the undirected projection.
    ///
    /// `None` unless the graph is weakly connected.
    pub fn diameter_and_avg_path(&self) -> Option<(u32, f64)> {
        let n = self.node_count();
        if n < 2 || !self.is_weakly_connected() {
            return None;
        }

        let adjacency = self.undirected.adjacency();
        let (diameter, total_hops) = (0..n)
            .into_par_iter()
            .map(|source| {
                hop_distances(adjacency, source)
                    .into_iter()
                    .flatten()
                    .fold((0u32, 0u64), |(max, sum), hops| (max.max(hops), sum + u64::from(hops)))
            })
            .reduce(|| (0, 0), |a, b| (a.0.max(b.0), a.1 + b.1));

        Some((diameter, total_hops as f64 / (n * (n - 1)) as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> StationGraph {
        StationGraph::from_edges(vec![
            Edge::new("A", "B", 5),
            Edge::new("A", "C", 3),
            Edge::new("B", "C", 2),
            Edge::new("C", "A", 1),
        ])
        .unwrap()
    }

    #[test]
    fn counts_and_density() {
        let graph = triangle();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4);
        assert!((graph.density() - 4.0 / 6.0).abs() < 1e-12);
        assert_eq!(graph.in_degree(2), 2);
        assert_eq!(graph.out_degree(0), 2);
        assert_eq!(graph.edge("B", "C").map(|e| e.weight), Some(2));
        assert!(graph.edge("C", "B").is_none());
    }

    #[test]
    fn connectivity_of_a_cycle() {
        let graph = triangle();

        assert!(graph.is_strongly_connected());
        assert!(graph.is_weakly_connected());
        assert_eq!(graph.diameter_and_avg_path(), Some((1, 1.0)));
    }

    #[test]
    fn chain_is_weak_but_not_strong() {
        let graph = StationGraph::from_edges(vec![Edge::new("A", "B", 1), Edge::new("B", "C", 1)]).unwrap();

        assert!(!graph.is_strongly_connected());
        assert!(graph.is_weakly_connected());

        let (diameter, avg) = graph.diameter_and_avg_path().unwrap();
        assert_eq!(diameter, 2);
        assert!((avg - 8.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_pairs_have_no_diameter() {
        let graph = StationGraph::from_edges(vec![Edge::new("A", "B", 1), Edge::new("C", "D", 1)]).unwrap();

        assert!(!graph.is_weakly_connected());
        assert_eq!(graph.diameter_and_avg_path(), None);
        assert_eq!(graph.weakly_connected_components(), (vec![0, 0, 1, 1], 2));
    }
}
