//! Configuration management for the station network analyzer

use crate::centrality::eigenvector::EigenvectorConfig;
use crate::centrality::pagerank::PageRankConfig;
use crate::community::CommunityStrategy;
use crate::paths::PathConfig;

/// Tunables for a single analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// PageRank damping and convergence settings
    pub pagerank: PageRankConfig,

    /// Eigenvector power-iteration settings
    pub eigenvector: EigenvectorConfig,

    /// Candidate selection for shortest-path analysis
    pub paths: PathConfig,

    /// Community detection algorithm
    pub community: CommunityStrategy,
}

impl AnalysisConfig {
    /// Create a new configuration with custom values
    pub fn new(
        pagerank: PageRankConfig,
        eigenvector: EigenvectorConfig,
        paths: PathConfig,
        community: CommunityStrategy,
    ) -> Self {
        Self {
            pagerank,
            eigenvector,
            paths,
            community,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AnalysisConfig::default();
        assert!((config.pagerank.damping - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.eigenvector.max_iter, 1000);
        assert_eq!(config.paths.candidate_count, 15);
        assert_eq!(config.paths.paired_count, 10);
        assert_eq!(config.community, CommunityStrategy::Greedy);
    }
}
