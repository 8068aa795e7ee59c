//! Community detection on the undirected projection

pub mod greedy;
pub mod modularity;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::components::connected_components;
use crate::graph::{StationGraph, UndirectedGraph};

pub use self::modularity::modularity;

/// Which algorithm to partition stations with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommunityStrategy {
    /// Greedy modularity maximisation, falling back to components on failure
    #[default]
    Greedy,
    /// Connected components only
    ConnectedComponents,
}

/// Reasons the greedy optimiser cannot produce a partition
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommunityError {
    #[error("projection has zero total edge weight")]
    ZeroWeight,

    #[error("modularity evaluated to a non-finite value ({0})")]
    NonFiniteModularity(f64),
}

/// Community label per node index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    labels: Vec<usize>,
    count: usize,
}

impl Partition {
    /// Build from arbitrary labels, renumbering communities by descending
    /// size with ties going to the community holding the lowest node index.
    pub fn from_labels(labels: &[usize]) -> Self {
        let mut groups: BTreeMap<usize, (usize, usize)> = BTreeMap::new();
        for (node, &label) in labels.iter().enumerate() {
            let entry = groups.entry(label).or_insert((0, node));
            entry.0 += 1;
        }

        let mut order: Vec<(usize, usize, usize)> = groups
            .into_iter()
            .map(|(label, (size, first))| (label, size, first))
            .collect();
        order.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        let renumber: BTreeMap<usize, usize> = order
            .iter()
            .enumerate()
            .map(|(new, &(old, _, _))| (old, new))
            .collect();

        Self {
            labels: labels.iter().map(|label| renumber[label]).collect(),
            count: order.len(),
        }
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of distinct communities
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Outcome of community detection
#[derive(Debug, Clone, PartialEq)]
pub enum CommunityOutcome {
    /// Greedy modularity partition and its score
    Optimized { partition: Partition, modularity: f64 },
    /// Connected-component partition, not optimised
    Fallback { partition: Partition },
}

impl CommunityOutcome {
    pub fn partition(&self) -> &Partition {
        match self {
            Self::Optimized { partition, .. } | Self::Fallback { partition } => partition,
        }
    }

    /// Modularity of the partition; exactly 0.0 for the fallback
    pub fn modularity(&self) -> f64 {
        match self {
            Self::Optimized { modularity, .. } => *modularity,
            Self::Fallback { .. } => 0.0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Station to community mapping handed to reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityAssignment {
    pub assignments: BTreeMap<String, usize>,
    pub modularity: f64,
    pub community_count: usize,
    pub optimized: bool,
}

impl CommunityAssignment {
    pub fn from_outcome(graph: &StationGraph, outcome: &CommunityOutcome) -> Self {
        let partition = outcome.partition();
        let assignments = partition
            .labels()
            .iter()
            .enumerate()
            .map(|(node, &label)| (graph.station_name(node).to_string(), label))
            .collect();

        Self {
            assignments,
            modularity: outcome.modularity(),
            community_count: partition.count(),
            optimized: !outcome.is_fallback(),
        }
    }

    /// Stations in community `id`, in name order
    pub fn members(&self, id: usize) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, &label)| label == id)
            .map(|(station, _)| station.as_str())
            .collect()
    }
}

/// Partition by connected components of the projection
pub fn component_partition(graph: &UndirectedGraph) -> Partition {
    let (labels, _) = connected_components(graph);
    Partition::from_labels(&labels)
}

/// Partition the station graph into communities
pub fn detect_communities(graph: &StationGraph, strategy: CommunityStrategy) -> CommunityOutcome {
    let undirected = graph.undirected_projection();

    let optimized = match strategy {
        CommunityStrategy::Greedy => match greedy::greedy_modularity(undirected) {
            Ok(result) => Some(result),
            Err(err) => {
                log::warn!("Greedy modularity failed ({}); using connected components", err);
                None
            }
        },
        CommunityStrategy::ConnectedComponents => None,
    };

    let outcome = match optimized {
        Some((partition, modularity)) => CommunityOutcome::Optimized {
            partition,
            modularity,
        },
        None => CommunityOutcome::Fallback {
            partition: component_partition(undirected),
        },
    };

    log::info!(
        "Found {} communities (modularity {:.4})",
        outcome.partition().count(),
        outcome.modularity()
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn two_triangles() -> StationGraph {
        StationGraph::from_edges(vec![
            Edge::new("A", "B", 1),
            Edge::new("B", "C", 1),
            Edge::new("C", "A", 1),
            Edge::new("X", "Y", 1),
            Edge::new("Y", "Z", 1),
            Edge::new("Z", "X", 1),
        ])
        .unwrap()
    }

    #[test]
    fn renumbering_orders_by_size_then_first_member() {
        let partition = Partition::from_labels(&[7, 3, 3, 9, 7, 3]);

        assert_eq!(partition.labels(), &[1, 0, 0, 2, 1, 0]);
        assert_eq!(partition.count(), 3);
    }

    #[test]
    fn forced_fallback_reports_zero_modularity() {
        let graph = two_triangles();
        let outcome = detect_communities(&graph, CommunityStrategy::ConnectedComponents);

        assert!(outcome.is_fallback());
        assert_eq!(outcome.modularity(), 0.0);
        let (_, components) = graph.weakly_connected_components();
        assert_eq!(outcome.partition().count(), components);
    }

    #[test]
    fn both_strategies_split_disjoint_triangles() {
        let graph = two_triangles();

        for strategy in [CommunityStrategy::Greedy, CommunityStrategy::ConnectedComponents] {
            let assignment = CommunityAssignment::from_outcome(&graph, &detect_communities(&graph, strategy));
            assert_eq!(assignment.community_count, 2);
            assert_eq!(assignment.members(0), vec!["A", "B", "C"]);
            assert_eq!(assignment.members(1), vec!["X", "Y", "Z"]);
        }
    }
}
