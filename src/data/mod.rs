//! Trip table input: loading and aggregation into station-to-station edges

pub mod aggregate;
pub mod loader;

use serde::{Deserialize, Serialize};

/// A single cleaned bike-share trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Station where the bike was unlocked
    pub origin_station: String,

    /// Station where the bike was locked
    pub destination_station: String,

    /// Trip duration in minutes
    pub duration_minutes: f64,

    /// Trip length in kilometers
    pub distance_km: f64,
}

impl Trip {
    pub fn new(
        origin_station: impl Into<String>,
        destination_station: impl Into<String>,
        duration_minutes: f64,
        distance_km: f64,
    ) -> Self {
        Self {
            origin_station: origin_station.into(),
            destination_station: destination_station.into(),
            duration_minutes,
            distance_km,
        }
    }

    /// Whether the trip starts and ends at the same station
    pub fn is_round_trip(&self) -> bool {
        self.origin_station == self.destination_station
    }
}
