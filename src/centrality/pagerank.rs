//! Weighted PageRank via power iteration.
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) * w(u, v) / W(u)   for each u → v
//! ```
//!
//! where `W(u)` is the total outgoing trip count of `u` and `d` the damping
//! factor. Stations with no outgoing trips spread their rank uniformly.

use crate::graph::StationGraph;

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankConfig {
    /// Probability of following an outgoing trip rather than teleporting.
    /// Default: 0.85.
    pub damping: f64,
    /// Stop once the L1 change of the rank vector drops below `n * tolerance`.
    /// Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

/// Result of a PageRank computation.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Score per node index, summing to 1.
    pub scores: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

pub fn pagerank(graph: &StationGraph, config: &PageRankConfig) -> PageRankResult {
    let n = graph.node_count();
    if n == 0 {
        return PageRankResult {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let adjacency = graph.outgoing();
    let n_f64 = n as f64;
    let teleport = (1.0 - config.damping) / n_f64;
    let out_weight: Vec<u64> = (0..n).map(|node| adjacency.weighted_degree(node)).collect();

    let mut ranks = vec![1.0 / n_f64; n];
    let mut next = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..config.max_iter {
        iterations += 1;

        let dangling: f64 = (0..n).filter(|&node| out_weight[node] == 0).map(|node| ranks[node]).sum();
        let base = teleport + config.damping * dangling / n_f64;
        next.fill(base);

        for node in 0..n {
            if out_weight[node] == 0 {
                continue;
            }
            let share = config.damping * ranks[node] / out_weight[node] as f64;
            for (target, weight) in adjacency.neighbors(node) {
                next[target] += share * weight as f64;
            }
        }

        let delta: f64 = ranks.iter().zip(&next).map(|(old, new)| (old - new).abs()).sum();
        std::mem::swap(&mut ranks, &mut next);

        if delta < n_f64 * config.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        log::warn!("PageRank did not converge after {} iterations", iterations);
    }

    let total: f64 = ranks.iter().sum();
    if total > 0.0 {
        for rank in &mut ranks {
            *rank /= total;
        }
    }

    PageRankResult {
        scores: ranks,
        iterations,
        converged,
    }
}
