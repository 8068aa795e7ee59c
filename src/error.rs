//! Error types for the network analysis engine

use thiserror::Error;

/// Fatal preconditions of an analysis run.
///
/// Recoverable degradations (eigenvector non-convergence, community
/// detection falling back to connected components, unreachable station
/// pairs) are not errors and never surface here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No trips were supplied, or every trip was a round trip.
    #[error("no inter-station trips to analyze ({total_trips} trips, {round_trips} round trips)")]
    EmptyInput {
        total_trips: usize,
        round_trips: usize,
    },

    /// A metric was requested on a graph with zero stations.
    #[error("station graph has no nodes")]
    EmptyGraph,
}
