//! Full analysis pipeline and its result object

use serde::{Deserialize, Serialize};

use crate::centrality::{compute_centrality, CentralityTable};
use crate::community::{detect_communities, CommunityAssignment};
use crate::config::AnalysisConfig;
use crate::data::aggregate::{aggregate_trips, AggregateSummary};
use crate::data::Trip;
use crate::error::AnalysisError;
use crate::graph::{NetworkSummary, StationGraph};
use crate::paths::{analyze_paths, PathRecord};

/// Everything the network analysis produces for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    pub trips: AggregateSummary,
    pub network: NetworkSummary,
    pub centrality: CentralityTable,
    pub communities: CommunityAssignment,
    pub paths: Vec<PathRecord>,
}

impl NetworkReport {
    /// Aggregate trips, build the station graph and analyse it.
    ///
    /// Fails before any graph is built when there are no inter-station trips.
    pub fn build(trips: &[Trip], config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        log::info!("Building station network from {} trips", trips.len());

        let (edges, trip_summary) = aggregate_trips(trips)?;
        let graph = StationGraph::from_edges(edges)?;

        let mut report = Self::from_graph(&graph, config)?;
        report.trips = trip_summary;
        Ok(report)
    }

    /// Analyse an already constructed graph
    pub fn from_graph(graph: &StationGraph, config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        if graph.node_count() == 0 {
            return Err(AnalysisError::EmptyGraph);
        }

        let network = NetworkSummary::from_graph(graph);
        log::info!(
            "Station network has {} stations and {} routes (density {:.4})",
            network.node_count,
            network.edge_count,
            network.density
        );

        // Centrality and community detection only read the graph.
        let (centrality, outcome) = rayon::join(
            || compute_centrality(graph, &config.pagerank, &config.eigenvector),
            || detect_communities(graph, config.community),
        );
        let centrality = centrality?;
        let communities = CommunityAssignment::from_outcome(graph, &outcome);

        let ranked = centrality.top_stations(config.paths.candidate_count);
        let paths = analyze_paths(graph, &ranked, &config.paths);

        let edge_trips: u64 = graph.edges().iter().map(|e| e.weight).sum();

        Ok(Self {
            trips: AggregateSummary {
                total_trips: edge_trips as usize,
                round_trips: 0,
                edges: graph.edge_count(),
            },
            network,
            centrality,
            communities,
            paths,
        })
    }
}
