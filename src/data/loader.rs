//! Load the cleaned trip table from CSV or Parquet

use std::path::Path;

use anyhow::{anyhow, Result};
use polars::prelude::*;

use crate::data::Trip;

/// Column names of the cleaned routes table
#[derive(Debug, Clone)]
pub struct TripColumns {
    pub origin: String,
    pub destination: String,
    pub duration: String,
    pub distance: String,
}

impl Default for TripColumns {
    fn default() -> Self {
        Self {
            origin: "startstationname".to_string(),
            destination: "endstationname".to_string(),
            duration: "duration_minutes_calculated".to_string(),
            distance: "length".to_string(),
        }
    }
}

/// Read trips from `path`, dispatching on the file extension
pub fn load_trips(path: &str, columns: &TripColumns) -> Result<Vec<Trip>> {
    log::info!("Reading trip table: {}", path);

    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let frame = match extension.as_deref() {
        Some("csv") => LazyCsvReader::new(file_path).with_has_header(true).finish()?,
        Some("parquet") => LazyFrame::scan_parquet(file_path, Default::default())?,
        _ => return Err(anyhow!("Unsupported trip table format: {}", path)),
    };

    let df = frame
        .select([
            col(columns.origin.as_str()).cast(DataType::String).alias("origin"),
            col(columns.destination.as_str()).cast(DataType::String).alias("destination"),
            col(columns.duration.as_str()).cast(DataType::Float64).alias("duration"),
            col(columns.distance.as_str()).cast(DataType::Float64).alias("distance"),
        ])
        .collect()?;

    log::debug!("Trip table schema: {:?}", df.schema());

    let trips = trips_from_frame(&df)?;
    log::info!("Loaded {} trips", trips.len());

    Ok(trips)
}

/// Convert a normalised frame (origin, destination, duration, distance) into trips
fn trips_from_frame(df: &DataFrame) -> Result<Vec<Trip>> {
    let origin_col = df.column("origin")?.str()?;
    let destination_col = df.column("destination")?.str()?;
    let duration_col = df.column("duration")?.f64()?;
    let distance_col = df.column("distance")?.f64()?;

    let mut trips = Vec::with_capacity(df.height());
    let mut skipped = 0usize;

    for i in 0..df.height() {
        let (Some(origin), Some(destination)) = (origin_col.get(i), destination_col.get(i)) else {
            skipped += 1;
            continue;
        };

        trips.push(Trip::new(
            origin,
            destination,
            duration_col.get(i).unwrap_or_default(),
            distance_col.get(i).unwrap_or_default(),
        ));
    }

    if skipped > 0 {
        log::warn!("Skipped {} trips with a missing station name", skipped);
    }

    Ok(trips)
}
