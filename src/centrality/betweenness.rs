//! Weighted betweenness centrality via Brandes' algorithm.
//!
//! For each source station a Dijkstra pass over the directed graph counts
//! shortest paths, then dependencies are accumulated in reverse settle
//! order. Edge cost is the raw trip count, so busy edges are long.
//!
//! Scores are normalised by `1 / ((n - 1)(n - 2))` when `n > 2`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rayon::prelude::*;

use crate::graph::compressed::CompressedAdjacency;
use crate::graph::StationGraph;

/// Betweenness score per node index
pub fn betweenness_centrality(graph: &StationGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    let adjacency = graph.outgoing();

    // Per-source dependency vectors are collected in source order and summed
    // sequentially so the result does not depend on thread scheduling.
    let dependencies: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|source| single_source_dependencies(adjacency, source))
        .collect();

    let mut scores = vec![0.0; n];
    for delta in &dependencies {
        for (score, d) in scores.iter_mut().zip(delta) {
            *score += d;
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for score in &mut scores {
            *score *= scale;
        }
    }

    scores
}

/// Dependency of `source` on every other node (zero for the source itself)
fn single_source_dependencies(adjacency: &CompressedAdjacency, source: usize) -> Vec<f64> {
    let n = adjacency.node_count();

    let mut dist: Vec<Option<u64>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut sigma = vec![0.0_f64; n];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut order: Vec<usize> = Vec::with_capacity(n);
    let mut heap = BinaryHeap::new();

    dist[source] = Some(0);
    sigma[source] = 1.0;
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((d, v))) = heap.pop() {
        if settled[v] {
            continue;
        }
        settled[v] = true;
        order.push(v);

        for (w, weight) in adjacency.neighbors(v) {
            if settled[w] {
                continue;
            }
            let candidate = d + weight;
            match dist[w] {
                Some(current) if candidate > current => {}
                Some(current) if candidate == current => {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
                _ => {
                    dist[w] = Some(candidate);
                    sigma[w] = sigma[v];
                    predecessors[w].clear();
                    predecessors[w].push(v);
                    heap.push(Reverse((candidate, w)));
                }
            }
        }
    }

    let mut delta = vec![0.0_f64; n];
    while let Some(w) = order.pop() {
        let coeff = (1.0 + delta[w]) / sigma[w];
        for &v in &predecessors[w] {
            delta[v] += sigma[v] * coeff;
        }
    }
    delta[source] = 0.0;

    delta
}
