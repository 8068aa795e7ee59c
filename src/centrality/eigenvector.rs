//! Weighted eigenvector centrality via power iteration.
//!
//! Iterates `x ← (Aᵀ + I) x` with L2 normalisation, where `A` holds trip
//! counts, so a station scores highly when busy stations send trips to it.
//! The identity shift keeps the iteration from oscillating on bipartite or
//! periodic structure.
//!
//! If the iteration has not settled after `max_iter` rounds, or produces a
//! non-finite value, every score is reported as 0.0.

use crate::graph::StationGraph;

/// Configuration for eigenvector centrality.
#[derive(Debug, Clone, PartialEq)]
pub struct EigenvectorConfig {
    /// Stop once the L1 change drops below `n * tolerance`. Default: 1e-6.
    pub tolerance: f64,
    /// Maximum number of iterations. Default: 1000.
    pub max_iter: usize,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iter: 1000,
        }
    }
}

/// Result of eigenvector centrality computation.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Score per node index; all zeros when `converged` is false.
    pub scores: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
}

pub fn eigenvector_centrality(graph: &StationGraph, config: &EigenvectorConfig) -> EigenvectorResult {
    let n = graph.node_count();
    if n == 0 {
        return EigenvectorResult {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let incoming = graph.incoming();
    let threshold = n as f64 * config.tolerance;

    let mut scores = vec![1.0 / n as f64; n];
    let mut iterations = 0;

    for _ in 0..config.max_iter {
        iterations += 1;

        let mut next: Vec<f64> = (0..n)
            .map(|v| {
                scores[v]
                    + incoming
                        .neighbors(v)
                        .map(|(u, weight)| scores[u] * weight as f64)
                        .sum::<f64>()
            })
            .collect();

        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if !norm.is_finite() {
            break;
        }
        if norm > 0.0 {
            for x in &mut next {
                *x /= norm;
            }
        }

        let diff: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        scores = next;

        if diff < threshold {
            return EigenvectorResult {
                scores,
                iterations,
                converged: true,
            };
        }
    }

    log::warn!(
        "Eigenvector centrality did not converge after {} iterations; reporting zeros",
        iterations
    );

    EigenvectorResult {
        scores: vec![0.0; n],
        iterations,
        converged: false,
    }
}
