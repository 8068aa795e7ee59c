//! Station graph representation and structural algorithms

pub mod builder;
pub mod components;
pub mod compressed;
pub mod projection;
pub mod station;
pub mod summary;
pub mod traversal;

use serde::{Deserialize, Serialize};

pub use builder::GraphBuilder;
pub use projection::UndirectedGraph;
pub use station::StationGraph;
pub use summary::NetworkSummary;

/// Aggregate of all trips from one station to another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub origin: String,
    pub destination: String,

    /// Number of trips
    pub weight: u64,

    /// Mean trip duration in minutes
    pub avg_duration: f64,

    /// Mean trip length in kilometers
    pub avg_distance: f64,
}

impl Edge {
    /// Edge with the given trip count and zeroed averages
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, weight: u64) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            weight,
            avg_duration: 0.0,
            avg_distance: 0.0,
        }
    }

    /// Fold another aggregate of the same station pair into this one
    pub fn merge(&mut self, other: &Edge) {
        let total = self.weight + other.weight;
        if total == 0 {
            return;
        }
        let (a, b, t) = (self.weight as f64, other.weight as f64, total as f64);
        self.avg_duration = (self.avg_duration * a + other.avg_duration * b) / t;
        self.avg_distance = (self.avg_distance * a + other.avg_distance * b) / t;
        self.weight = total;
    }
}
