//! Collapse individual trips into weighted directed edges

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::Trip;
use crate::error::AnalysisError;
use crate::graph::Edge;

/// Counts gathered while aggregating a trip table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub total_trips: usize,
    pub round_trips: usize,
    pub edges: usize,
}

/// Running sums for one (origin, destination) group
#[derive(Default)]
struct Accumulator {
    count: u64,
    duration_sum: f64,
    distance_sum: f64,
}

/// Group trips by (origin, destination) and emit one edge per group.
///
/// Round trips are dropped. Edges come out ordered by origin then
/// destination name.
pub fn aggregate_trips(trips: &[Trip]) -> Result<(Vec<Edge>, AggregateSummary), AnalysisError> {
    let mut summary = AggregateSummary {
        total_trips: trips.len(),
        ..AggregateSummary::default()
    };

    let mut groups: BTreeMap<(&str, &str), Accumulator> = BTreeMap::new();

    for trip in trips {
        if trip.is_round_trip() {
            summary.round_trips += 1;
            continue;
        }

        let acc = groups
            .entry((trip.origin_station.as_str(), trip.destination_station.as_str()))
            .or_default();
        acc.count += 1;
        acc.duration_sum += trip.duration_minutes;
        acc.distance_sum += trip.distance_km;
    }

    if groups.is_empty() {
        return Err(AnalysisError::EmptyInput {
            total_trips: summary.total_trips,
            round_trips: summary.round_trips,
        });
    }

    let edges: Vec<Edge> = groups
        .into_iter()
        .map(|((origin, destination), acc)| Edge {
            origin: origin.to_string(),
            destination: destination.to_string(),
            weight: acc.count,
            avg_duration: acc.duration_sum / acc.count as f64,
            avg_distance: acc.distance_sum / acc.count as f64,
        })
        .collect();

    summary.edges = edges.len();

    log::info!(
        "Aggregated {} trips into {} edges ({} round trips dropped)",
        summary.total_trips,
        summary.edges,
        summary.round_trips
    );

    Ok((edges, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn groups_trips_and_averages_metrics() {
        let trips = vec![
            Trip::new("A", "B", 10.0, 2.0),
            Trip::new("A", "B", 20.0, 4.0),
            Trip::new("B", "A", 5.0, 1.0),
        ];

        let (edges, summary) = aggregate_trips(&trips).unwrap();

        assert_eq!(edges.len(), 2);
        assert_eq!(summary.edges, 2);
        let ab = &edges[0];
        assert_eq!((ab.origin.as_str(), ab.destination.as_str()), ("A", "B"));
        assert_eq!(ab.weight, 2);
        assert!((ab.avg_duration - 15.0).abs() < 1e-12);
        assert!((ab.avg_distance - 3.0).abs() < 1e-12);
    }

    #[test]
    fn round_trips_are_dropped() {
        let trips = vec![
            Trip::new("A", "A", 10.0, 0.5),
            Trip::new("A", "B", 10.0, 2.0),
        ];

        let (edges, summary) = aggregate_trips(&trips).unwrap();

        assert_eq!(edges.len(), 1);
        assert_eq!(summary.round_trips, 1);
        assert!(edges.iter().all(|e| e.origin != e.destination));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = aggregate_trips(&[]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::EmptyInput {
                total_trips: 0,
                round_trips: 0
            }
        );
    }

    #[test]
    fn all_round_trips_behave_like_empty_input() {
        let trips = vec![Trip::new("A", "A", 3.0, 0.1), Trip::new("B", "B", 4.0, 0.2)];
        assert!(matches!(
            aggregate_trips(&trips),
            Err(AnalysisError::EmptyInput { round_trips: 2, .. })
        ));
    }

    fn station() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["A", "B", "C", "D", "E"]).prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn edge_weights_sum_to_non_round_trip_count(
            pairs in prop::collection::vec((station(), station()), 1..200)
        ) {
            let trips: Vec<Trip> = pairs
                .iter()
                .map(|(o, d)| Trip::new(o.clone(), d.clone(), 1.0, 1.0))
                .collect();
            let non_round = trips.iter().filter(|t| !t.is_round_trip()).count();

            match aggregate_trips(&trips) {
                Ok((edges, _)) => {
                    let total: u64 = edges.iter().map(|e| e.weight).sum();
                    prop_assert_eq!(total as usize, non_round);
                }
                Err(_) => prop_assert_eq!(non_round, 0),
            }
        }
    }
}
