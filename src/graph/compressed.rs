//! Compressed sparse row adjacency with integer edge weights

use serde::{Deserialize, Serialize};

/// Compressed sparse representation of weighted adjacency lists
///
/// `offsets[i]..offsets[i + 1]` is the slice of `targets` and `weights`
/// belonging to node `i`. Each slice is sorted by target index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedAdjacency {
    /// Offset array: index where each node's edges begin
    offsets: Vec<u32>,

    /// Edge array: concatenated lists of target nodes
    targets: Vec<u32>,

    /// Trip-count weight of each entry in `targets`
    weights: Vec<u64>,
}

impl CompressedAdjacency {
    /// Build from one `(target, weight)` list per node.
    ///
    /// Lists are sorted in place by target so lookups can binary search.
    pub fn from_lists(mut lists: Vec<Vec<(u32, u64)>>) -> Self {
        let edge_count: usize = lists.iter().map(Vec::len).sum();

        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut targets = Vec::with_capacity(edge_count);
        let mut weights = Vec::with_capacity(edge_count);

        offsets.push(0);
        for list in &mut lists {
            list.sort_unstable_by_key(|&(target, _)| target);
            for &(target, weight) in list.iter() {
                targets.push(target);
                weights.push(weight);
            }
            offsets.push(targets.len() as u32);
        }

        Self {
            offsets,
            targets,
            weights,
        }
    }

    /// Number of nodes covered by the offset array
    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Total number of stored adjacency entries
    pub fn entry_count(&self) -> usize {
        self.targets.len()
    }

    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize..self.offsets[node + 1] as usize
    }

    /// Position of the `src -> dst` entry in the flat arrays
    pub fn position(&self, src: usize, dst: u32) -> Option<usize> {
        let range = self.range(src);
        let start = range.start;
        self.targets[range].binary_search(&dst).ok().map(|pos| start + pos)
    }

    /// Target indices adjacent to `node`
    pub fn targets(&self, node: usize) -> &[u32] {
        &self.targets[self.range(node)]
    }

    /// `(target, weight)` pairs adjacent to `node`
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        let range = self.range(node);
        self.targets[range.clone()]
            .iter()
            .zip(&self.weights[range])
            .map(|(&target, &weight)| (target as usize, weight))
    }

    /// Number of entries adjacent to `node`
    pub fn degree(&self, node: usize) -> usize {
        let range = self.range(node);
        range.end - range.start
    }

    /// Sum of weights adjacent to `node`
    pub fn weighted_degree(&self, node: usize) -> u64 {
        self.weights[self.range(node)].iter().sum()
    }

    /// Weight of the `src -> dst` entry, if present
    pub fn weight(&self, src: usize, dst: u32) -> Option<u64> {
        self.position(src, dst).map(|pos| self.weights[pos])
    }

    /// Check if there's an entry from src to dst
    pub fn has_edge(&self, src: usize, dst: u32) -> bool {
        self.position(src, dst).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_lists_and_answers_lookups() {
        let adj = CompressedAdjacency::from_lists(vec![vec![(2, 7), (1, 3)], vec![], vec![(0, 1)]]);

        assert_eq!(adj.node_count(), 3);
        assert_eq!(adj.entry_count(), 3);
        assert_eq!(adj.targets(0), &[1, 2]);
        assert_eq!(adj.weight(0, 2), Some(7));
        assert_eq!(adj.weight(1, 0), None);
        assert_eq!(adj.degree(1), 0);
        assert_eq!(adj.weighted_degree(0), 10);
        assert!(adj.has_edge(2, 0));
        assert_eq!(adj.neighbors(0).collect::<Vec<_>>(), vec![(1, 3), (2, 7)]);
    }
}
