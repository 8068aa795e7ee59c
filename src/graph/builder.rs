//! Station graph construction

use std::collections::{BTreeSet, HashMap};

use crate::error::AnalysisError;
use crate::graph::compressed::CompressedAdjacency;
use crate::graph::projection::project_undirected;
use crate::graph::{Edge, StationGraph};

/// Builder for constructing a StationGraph from aggregated edges
pub struct GraphBuilder {
    /// Mapping from station names to node indices
    id_to_index: HashMap<String, u32>,

    /// Station names by node index
    node_ids: Vec<String>,

    /// Outgoing `(target, slot)` lists, where slot indexes `edges`
    adjacency_lists: Vec<Vec<(u32, usize)>>,

    /// Edge metadata in insertion order
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
            edges: Vec::new(),
        }
    }

    /// Create a builder pre-populated with `edges`.
    ///
    /// Stations are interned in ascending name order so node indices do not
    /// depend on the order edges arrive in.
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        let edges: Vec<Edge> = edges.into_iter().collect();
        let names: BTreeSet<&str> = edges
            .iter()
            .flat_map(|e| [e.origin.as_str(), e.destination.as_str()])
            .collect();

        let mut builder = Self::with_capacity(names.len());
        for name in names {
            builder.get_or_create_node(name);
        }
        for edge in edges {
            builder.add_edge(edge);
        }
        builder
    }

    /// Get or create a node index for the given station name
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());

        idx
    }

    /// Add a directed edge. Self-loops are ignored and repeated pairs are merged.
    pub fn add_edge(&mut self, edge: Edge) {
        if edge.origin == edge.destination || edge.weight == 0 {
            log::debug!("Ignoring edge {} -> {}", edge.origin, edge.destination);
            return;
        }

        let src_idx = self.get_or_create_node(&edge.origin);
        let dst_idx = self.get_or_create_node(&edge.destination);

        let existing = self.adjacency_lists[src_idx as usize]
            .iter()
            .find(|&&(target, _)| target == dst_idx)
            .map(|&(_, slot)| slot);

        match existing {
            Some(slot) => self.edges[slot].merge(&edge),
            None => {
                self.adjacency_lists[src_idx as usize].push((dst_idx, self.edges.len()));
                self.edges.push(edge);
            }
        }
    }

    /// Build the station graph
    pub fn build(mut self) -> Result<StationGraph, AnalysisError> {
        if self.edges.is_empty() {
            return Err(AnalysisError::EmptyGraph);
        }

        let node_count = self.node_ids.len();

        // Edge metadata is reordered to match the CSR layout of `outgoing`.
        let mut ordered_edges = Vec::with_capacity(self.edges.len());
        let mut out_lists: Vec<Vec<(u32, u64)>> = Vec::with_capacity(node_count);
        let mut in_lists: Vec<Vec<(u32, u64)>> = vec![Vec::new(); node_count];

        for (src, list) in self.adjacency_lists.iter_mut().enumerate() {
            list.sort_unstable_by_key(|&(target, _)| target);
            let mut out = Vec::with_capacity(list.len());
            for &(dst, slot) in list.iter() {
                let weight = self.edges[slot].weight;
                out.push((dst, weight));
                in_lists[dst as usize].push((src as u32, weight));
                ordered_edges.push(self.edges[slot].clone());
            }
            out_lists.push(out);
        }

        let outgoing = CompressedAdjacency::from_lists(out_lists);
        let incoming = CompressedAdjacency::from_lists(in_lists);
        let undirected = project_undirected(&outgoing, &incoming);

        log::debug!(
            "Built station graph with {} nodes and {} edges",
            node_count,
            ordered_edges.len()
        );

        Ok(StationGraph {
            node_ids: self.node_ids,
            id_to_index: self.id_to_index,
            outgoing,
            incoming,
            edges: ordered_edges,
            undirected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_name_order() {
        let graph = GraphBuilder::from_edges(vec![
            Edge::new("Zoo", "Airport", 2),
            Edge::new("Market", "Zoo", 1),
        ])
        .build()
        .unwrap();

        assert_eq!(graph.station_name(0), "Airport");
        assert_eq!(graph.station_name(1), "Market");
        assert_eq!(graph.station_name(2), "Zoo");
    }

    #[test]
    fn repeated_pairs_are_merged() {
        let mut builder = GraphBuilder::with_capacity(2);
        builder.add_edge(Edge {
            origin: "A".into(),
            destination: "B".into(),
            weight: 1,
            avg_duration: 10.0,
            avg_distance: 1.0,
        });
        builder.add_edge(Edge {
            origin: "A".into(),
            destination: "B".into(),
            weight: 3,
            avg_duration: 2.0,
            avg_distance: 5.0,
        });
        let graph = builder.build().unwrap();

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edge("A", "B").unwrap();
        assert_eq!(edge.weight, 4);
        assert!((edge.avg_duration - 4.0).abs() < 1e-12);
        assert!((edge.avg_distance - 4.0).abs() < 1e-12);
    }

    #[test]
    fn self_loops_are_ignored() {
        let mut builder = GraphBuilder::with_capacity(1);
        builder.add_edge(Edge::new("A", "A", 4));
        assert_eq!(builder.build().unwrap_err(), AnalysisError::EmptyGraph);
    }
}
