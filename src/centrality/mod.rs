//! Centrality metrics for the station graph.
//!
//! Each metric answers a different question about station importance:
//!
//! - **Degree** (`degree`): how many stations exchange trips with this one?
//! - **Betweenness** (`betweenness`): which stations sit on shortest routes
//!   between other pairs?
//! - **Closeness** (`closeness`): how near is a station to all others?
//! - **PageRank** (`pagerank`): where does trip flow accumulate?
//! - **Eigenvector** (`eigenvector`): which stations are fed by other
//!   important stations?
//!
//! Betweenness, closeness and shortest paths all treat the raw trip count as
//! an edge *cost*, while PageRank and eigenvector treat it as an affinity.

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;
pub mod pagerank;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::graph::StationGraph;

use self::betweenness::betweenness_centrality;
use self::closeness::closeness_centrality;
use self::degree::degree_scores;
use self::eigenvector::{eigenvector_centrality, EigenvectorConfig};
use self::pagerank::{pagerank, PageRankConfig};

/// All centrality scores for one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityRecord {
    pub station: String,
    pub in_degree: usize,
    pub out_degree: usize,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
    pub pagerank: f64,
    pub eigenvector_centrality: f64,
}

/// Centrality records ranked by descending PageRank, ties by station name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityTable {
    pub records: Vec<CentralityRecord>,
    pub pagerank_iterations: usize,
    pub pagerank_converged: bool,
    pub eigenvector_converged: bool,
}

impl CentralityTable {
    /// Names of the `k` highest-ranked stations
    pub fn top_stations(&self, k: usize) -> Vec<String> {
        self.records.iter().take(k).map(|r| r.station.clone()).collect()
    }

    pub fn get(&self, station: &str) -> Option<&CentralityRecord> {
        self.records.iter().find(|r| r.station == station)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Compute every centrality metric and rank stations by PageRank
pub fn compute_centrality(
    graph: &StationGraph,
    pagerank_config: &PageRankConfig,
    eigenvector_config: &EigenvectorConfig,
) -> Result<CentralityTable, AnalysisError> {
    if graph.node_count() == 0 {
        return Err(AnalysisError::EmptyGraph);
    }

    log::info!("Calculating centrality metrics for {} stations", graph.node_count());

    let degrees = degree_scores(graph);
    let ((betweenness, closeness), (ranks, eigen)) = rayon::join(
        || {
            rayon::join(
                || betweenness_centrality(graph),
                || closeness_centrality(graph.undirected_projection()),
            )
        },
        || {
            (
                pagerank(graph, pagerank_config),
                eigenvector_centrality(graph, eigenvector_config),
            )
        },
    );

    log::debug!(
        "PageRank finished after {} iterations (converged: {})",
        ranks.iterations,
        ranks.converged
    );

    let mut records: Vec<CentralityRecord> = (0..graph.node_count())
        .map(|node| CentralityRecord {
            station: graph.station_name(node).to_string(),
            in_degree: degrees.in_degree[node],
            out_degree: degrees.out_degree[node],
            degree_centrality: degrees.centrality[node],
            betweenness_centrality: betweenness[node],
            closeness_centrality: closeness[node],
            pagerank: ranks.scores[node],
            eigenvector_centrality: eigen.scores[node],
        })
        .collect();

    records.sort_by(|a, b| {
        b.pagerank
            .total_cmp(&a.pagerank)
            .then_with(|| a.station.cmp(&b.station))
    });

    Ok(CentralityTable {
        records,
        pagerank_iterations: ranks.iterations,
        pagerank_converged: ranks.converged,
        eigenvector_converged: eigen.converged,
    })
}
