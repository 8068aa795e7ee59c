//! Breadth-first and weighted shortest-path traversals

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::graph::compressed::CompressedAdjacency;

/// Mark every node reachable from `start` (including `start`)
pub fn reachable_from(adjacency: &CompressedAdjacency, start: usize) -> Vec<bool> {
    let mut seen = vec![false; adjacency.node_count()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;

    while let Some(node) = queue.pop_front() {
        for &next in adjacency.targets(node) {
            let next = next as usize;
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }

    seen
}

/// Unweighted hop distance from `start` to every node
pub fn hop_distances(adjacency: &CompressedAdjacency, start: usize) -> Vec<Option<u32>> {
    let mut dist = vec![None; adjacency.node_count()];
    let mut queue = VecDeque::from([start]);
    dist[start] = Some(0);

    while let Some(node) = queue.pop_front() {
        let next_hops = dist[node].map_or(0, |d| d + 1);
        for &next in adjacency.targets(node) {
            let next = next as usize;
            if dist[next].is_none() {
                dist[next] = Some(next_hops);
                queue.push_back(next);
            }
        }
    }

    dist
}

/// Single-source weighted shortest paths, edge weight used as cost
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: usize,

    /// Weighted distance from the source, `None` when unreachable
    pub dist: Vec<Option<u64>>,

    /// Predecessor on one shortest path from the source
    pub pred: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Node sequence from the source to `target`, or `None` if unreachable
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.dist[target]?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.pred[current]?;
            path.push(current);
        }
        path.reverse();

        Some(path)
    }
}

/// Dijkstra from `source`.
///
/// Among equal-cost paths the one discovered first wins; with the CSR lists
/// sorted by target this makes the chosen path deterministic.
pub fn dijkstra(adjacency: &CompressedAdjacency, source: usize) -> ShortestPaths {
    let n = adjacency.node_count();
    let mut dist: Vec<Option<u64>> = vec![None; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = Some(0);
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((d, node))) = heap.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;

        for (next, weight) in adjacency.neighbors(node) {
            let candidate = d + weight;
            if dist[next].map_or(true, |current| candidate < current) {
                dist[next] = Some(candidate);
                pred[next] = Some(node);
                heap.push(Reverse((candidate, next)));
            }
        }
    }

    ShortestPaths { source, dist, pred }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_with_shortcut() -> CompressedAdjacency {
        // 0 -1- 1 -1- 2, plus a direct 0 -5- 2
        CompressedAdjacency::from_lists(vec![
            vec![(1, 1), (2, 5)],
            vec![(0, 1), (2, 1)],
            vec![(0, 5), (1, 1)],
            vec![],
        ])
    }

    #[test]
    fn dijkstra_prefers_cheaper_multi_hop_route() {
        let paths = dijkstra(&line_with_shortcut(), 0);

        assert_eq!(paths.dist[2], Some(2));
        assert_eq!(paths.path_to(2), Some(vec![0, 1, 2]));
        assert_eq!(paths.path_to(0), Some(vec![0]));
        assert_eq!(paths.path_to(3), None);
    }

    #[test]
    fn bfs_helpers_ignore_weights() {
        let adj = line_with_shortcut();

        assert_eq!(hop_distances(&adj, 0), vec![Some(0), Some(1), Some(1), None]);
        assert_eq!(reachable_from(&adj, 1), vec![true, true, true, false]);
    }
}
