//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, to_string_pretty};

use crate::report::NetworkReport;

/// Save analysis results to the specified directory
pub fn save_results(report: &NetworkReport, output_dir: &str) -> Result<()> {
    log::info!("Saving network analysis results to {}", output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(report, output_dir)?;
    write_json(output_dir, "centrality.json", &report.centrality)?;
    write_json(output_dir, "communities.json", &report.communities)?;
    write_json(output_dir, "paths.json", &report.paths)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save the network summary with headline community and ranking figures
fn save_summary(report: &NetworkReport, output_dir: &str) -> Result<()> {
    let top_stations: Vec<_> = report
        .centrality
        .records
        .iter()
        .take(10)
        .map(|r| json!({ "station": r.station, "pagerank": r.pagerank }))
        .collect();

    let summary = json!({
        "trips": report.trips,
        "network": report.network,
        "community_stats": {
            "community_count": report.communities.community_count,
            "modularity": report.communities.modularity,
            "optimized": report.communities.optimized,
        },
        "top_stations": top_stations,
        "path_count": report.paths.len(),
    });

    write_json(output_dir, "summary.json", &summary)
}

fn write_json<T: Serialize + ?Sized>(output_dir: &str, name: &str, value: &T) -> Result<()> {
    let path = Path::new(output_dir).join(name);
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::data::Trip;

    #[test]
    fn writes_every_table() {
        let trips = vec![
            Trip::new("A", "B", 5.0, 1.0),
            Trip::new("B", "C", 6.0, 1.2),
            Trip::new("C", "A", 7.0, 0.9),
        ];
        let report = NetworkReport::build(&trips, &AnalysisConfig::default()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();

        save_results(&report, out).unwrap();

        for name in ["summary.json", "centrality.json", "communities.json", "paths.json"] {
            assert!(dir.path().join(name).exists(), "missing {name}");
        }

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary["network"]["node_count"], 3);
        assert_eq!(summary["community_stats"]["community_count"], 1);

        let paths: Vec<crate::paths::PathRecord> =
            serde_json::from_str(&fs::read_to_string(dir.path().join("paths.json")).unwrap()).unwrap();
        assert_eq!(paths, report.paths);
    }
}
