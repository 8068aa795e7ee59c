//! Greedy agglomerative modularity maximisation (Clauset-Newman-Moore).
//!
//! Every station starts in its own community. At each step the pair of
//! adjacent communities whose merge gives the largest modularity gain
//!
//! ```text
//! ΔQ(i, j) = 2 * (e_ij - a_i * a_j)
//! ```
//!
//! is merged, where `e_ij` is the fraction of edge-weight endpoints running
//! from community `i` to `j` and `a_i` the fraction attached to `i`.
//! Merging stops when no pair has a positive gain. Ties go to the pair with
//! the lowest community ids.

use std::collections::BTreeMap;

use crate::community::modularity::modularity;
use crate::community::{CommunityError, Partition};
use crate::graph::UndirectedGraph;

/// Run the greedy optimiser, returning the partition and its modularity
pub fn greedy_modularity(graph: &UndirectedGraph) -> Result<(Partition, f64), CommunityError> {
    let n = graph.node_count();
    let total_weight = graph.total_weight();
    if total_weight == 0 {
        return Err(CommunityError::ZeroWeight);
    }

    let two_m = 2.0 * total_weight as f64;

    let mut a: Vec<f64> = (0..n).map(|node| graph.weighted_degree(node) as f64 / two_m).collect();
    let mut e: Vec<BTreeMap<usize, f64>> = (0..n)
        .map(|node| {
            graph
                .neighbors(node)
                .map(|(other, weight)| (other, weight as f64 / two_m))
                .collect()
        })
        .collect();
    let mut active = vec![true; n];
    let mut labels: Vec<usize> = (0..n).collect();
    let mut merges = 0usize;

    while let Some((i, j, gain)) = best_merge(&e, &a, &active) {
        if gain <= 0.0 {
            break;
        }

        // Fold community j into i.
        let absorbed = std::mem::take(&mut e[j]);
        for (k, weight) in absorbed {
            if k == i {
                continue;
            }
            e[k].remove(&j);
            *e[i].entry(k).or_insert(0.0) += weight;
            *e[k].entry(i).or_insert(0.0) += weight;
        }
        e[i].remove(&j);
        a[i] += a[j];
        a[j] = 0.0;
        active[j] = false;

        for label in labels.iter_mut() {
            if *label == j {
                *label = i;
            }
        }
        merges += 1;
    }

    log::debug!("Greedy modularity performed {} merges", merges);

    let partition = Partition::from_labels(&labels);
    let score = modularity(graph, partition.labels());
    if !score.is_finite() {
        return Err(CommunityError::NonFiniteModularity(score));
    }

    Ok((partition, score))
}

/// Adjacent pair with the largest gain, lowest ids first on ties
fn best_merge(e: &[BTreeMap<usize, f64>], a: &[f64], active: &[bool]) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;

    for (i, row) in e.iter().enumerate() {
        if !active[i] {
            continue;
        }
        for (&j, &e_ij) in row.range(i + 1..) {
            let gain = 2.0 * (e_ij - a[i] * a[j]);
            if best.map_or(true, |(_, _, current)| gain > current) {
                best = Some((i, j, gain));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, StationGraph};

    #[test]
    fn fully_connected_trio_collapses_to_one_community() {
        let graph = StationGraph::from_edges(vec![
            Edge::new("A", "B", 5),
            Edge::new("A", "C", 3),
            Edge::new("B", "C", 2),
            Edge::new("C", "A", 1),
        ])
        .unwrap();

        let (partition, score) = greedy_modularity(graph.undirected_projection()).unwrap();

        assert_eq!(partition.count(), 1);
        assert!(score.abs() < 1e-12);
    }

    #[test]
    fn weak_bridge_keeps_dense_groups_apart() {
        let graph = StationGraph::from_edges(vec![
            Edge::new("A", "B", 10),
            Edge::new("B", "C", 10),
            Edge::new("C", "A", 10),
            Edge::new("X", "Y", 10),
            Edge::new("Y", "Z", 10),
            Edge::new("Z", "X", 10),
            Edge::new("C", "X", 1),
        ])
        .unwrap();

        let (partition, score) = greedy_modularity(graph.undirected_projection()).unwrap();

        assert_eq!(partition.count(), 2);
        let labels = partition.labels();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_ne!(labels[2], labels[3]);
        assert!(score > 0.4);
    }
}
