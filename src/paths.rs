//! Shortest paths among the highest-ranked stations

use serde::{Deserialize, Serialize};

use crate::graph::traversal::dijkstra;
use crate::graph::StationGraph;

/// Candidate selection for pairwise path analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// Number of top-ranked stations considered as path endpoints
    pub candidate_count: usize,

    /// Number of leading candidates used as path sources
    pub paired_count: usize,

    /// Stations kept in each path preview
    pub preview_len: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            candidate_count: 15,
            paired_count: 10,
            preview_len: 3,
        }
    }
}

/// Shortest weighted path between two candidate stations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub source: String,
    pub target: String,

    /// Edges traversed
    pub hop_count: usize,

    /// Sum of undirected trip-count weights along the path
    pub weighted_distance: u64,

    /// Leading station names of the path
    pub path_preview: Vec<String>,

    /// Whether `path_preview` omits later stations
    pub truncated: bool,
}

/// Shortest paths between pairs of candidate stations.
///
/// `ranked` is the station ranking (best first). Sources are the first
/// `paired_count` candidates; each is paired with every later station in
/// the first `candidate_count`. Unknown stations and unreachable pairs are
/// skipped. Records are sorted by ascending weighted distance, then by
/// source and target name.
pub fn analyze_paths(graph: &StationGraph, ranked: &[String], config: &PathConfig) -> Vec<PathRecord> {
    let candidates = &ranked[..ranked.len().min(config.candidate_count)];
    let sources = candidates.len().min(config.paired_count);
    let undirected = graph.undirected_projection();

    let mut records = Vec::new();

    for (i, source) in candidates.iter().take(sources).enumerate() {
        let Some(source_idx) = graph.station_index(source) else {
            continue;
        };
        let paths = dijkstra(undirected.adjacency(), source_idx);

        for target in &candidates[i + 1..] {
            let Some(target_idx) = graph.station_index(target) else {
                continue;
            };
            if target_idx == source_idx {
                continue;
            }
            let (Some(distance), Some(path)) = (paths.dist[target_idx], paths.path_to(target_idx)) else {
                continue;
            };

            records.push(PathRecord {
                source: source.clone(),
                target: target.clone(),
                hop_count: path.len() - 1,
                weighted_distance: distance,
                path_preview: path
                    .iter()
                    .take(config.preview_len)
                    .map(|&node| graph.station_name(node).to_string())
                    .collect(),
                truncated: path.len() > config.preview_len,
            });
        }
    }

    records.sort_by(|a, b| {
        a.weighted_distance
            .cmp(&b.weighted_distance)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.target.cmp(&b.target))
    });

    log::info!("Computed {} shortest paths between top stations", records.len());

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_cheapest_route_and_previews_it() {
        // A-B 1, B-C 1, C-D 1, A-D 10 (undirected)
        let graph = StationGraph::from_edges(vec![
            Edge::new("A", "B", 1),
            Edge::new("B", "C", 1),
            Edge::new("C", "D", 1),
            Edge::new("D", "A", 10),
        ])
        .unwrap();

        let records = analyze_paths(&graph, &names(&["A", "D"]), &PathConfig::default());

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.hop_count, 3);
        assert_eq!(record.weighted_distance, 3);
        assert_eq!(record.path_preview, names(&["A", "B", "C"]));
        assert!(record.truncated);
    }

    #[test]
    fn only_leading_candidates_are_sources() {
        let graph = StationGraph::from_edges(vec![
            Edge::new("A", "B", 1),
            Edge::new("B", "C", 2),
            Edge::new("C", "D", 3),
        ])
        .unwrap();
        let config = PathConfig {
            candidate_count: 3,
            paired_count: 1,
            preview_len: 3,
        };

        let records = analyze_paths(&graph, &names(&["B", "A", "C", "D"]), &config);

        let pairs: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.source.as_str(), r.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("B", "A"), ("B", "C")]);
        assert!(records.iter().all(|r| r.hop_count >= 1));
    }

    #[test]
    fn unknown_and_unreachable_stations_are_skipped() {
        let graph = StationGraph::from_edges(vec![Edge::new("A", "B", 1), Edge::new("C", "D", 1)]).unwrap();

        let records = analyze_paths(&graph, &names(&["A", "Ghost", "C", "B"]), &PathConfig::default());

        assert_eq!(records.len(), 1);
        assert_eq!((records[0].source.as_str(), records[0].target.as_str()), ("A", "B"));
        assert!(!records[0].truncated);
    }
}
