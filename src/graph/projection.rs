//! Undirected projection of the station graph

use itertools::Itertools;

use crate::graph::compressed::CompressedAdjacency;

/// Undirected weighted view of a station graph.
///
/// Node indices are shared with the directed graph it was projected from.
/// Each station pair appears once in each endpoint's adjacency list and
/// carries the sum of the directed weights between the two stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndirectedGraph {
    adjacency: CompressedAdjacency,
    total_weight: u64,
}

impl UndirectedGraph {
    pub fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }

    /// Number of undirected station pairs
    pub fn edge_count(&self) -> usize {
        self.adjacency.entry_count() / 2
    }

    /// Sum of undirected edge weights, each pair counted once
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.adjacency.neighbors(node)
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.degree(node)
    }

    /// Sum of weights of all edges touching `node`
    pub fn weighted_degree(&self, node: usize) -> u64 {
        self.adjacency.weighted_degree(node)
    }

    pub fn weight(&self, a: usize, b: usize) -> Option<u64> {
        self.adjacency.weight(a, b as u32)
    }

    pub(crate) fn adjacency(&self) -> &CompressedAdjacency {
        &self.adjacency
    }
}

/// Collapse directed adjacency into an undirected graph with summed weights
pub fn project_undirected(
    outgoing: &CompressedAdjacency,
    incoming: &CompressedAdjacency,
) -> UndirectedGraph {
    let node_count = outgoing.node_count();
    let mut lists: Vec<Vec<(u32, u64)>> = Vec::with_capacity(node_count);
    let mut total_weight = 0u64;

    for node in 0..node_count {
        let merged: Vec<(u32, u64)> = outgoing
            .neighbors(node)
            .merge_by(incoming.neighbors(node), |a, b| a.0 <= b.0)
            .map(|(target, weight)| (target as u32, weight))
            .coalesce(|a, b| {
                if a.0 == b.0 {
                    Ok((a.0, a.1 + b.1))
                } else {
                    Err((a, b))
                }
            })
            .collect();

        // Every directed edge is seen once as outgoing at its source.
        total_weight += outgoing.weighted_degree(node);
        lists.push(merged);
    }

    UndirectedGraph {
        adjacency: CompressedAdjacency::from_lists(lists),
        total_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions_are_summed() {
        // 0 -> 1 (5), 1 -> 0 (2), 1 -> 2 (4)
        let outgoing = CompressedAdjacency::from_lists(vec![vec![(1, 5)], vec![(0, 2), (2, 4)], vec![]]);
        let incoming = CompressedAdjacency::from_lists(vec![vec![(1, 2)], vec![(0, 5)], vec![(1, 4)]]);

        let undirected = project_undirected(&outgoing, &incoming);

        assert_eq!(undirected.edge_count(), 2);
        assert_eq!(undirected.weight(0, 1), Some(7));
        assert_eq!(undirected.weight(1, 0), Some(7));
        assert_eq!(undirected.weight(2, 1), Some(4));
        assert_eq!(undirected.weight(0, 2), None);
        assert_eq!(undirected.total_weight(), 11);
        assert_eq!(undirected.weighted_degree(1), 11);
    }
}
