use anyhow::Result;
use clap::{Parser, ValueEnum};

use station_network_analyzer::centrality::eigenvector::EigenvectorConfig;
use station_network_analyzer::centrality::pagerank::PageRankConfig;
use station_network_analyzer::community::CommunityStrategy;
use station_network_analyzer::data::loader::{load_trips, TripColumns};
use station_network_analyzer::paths::PathConfig;
use station_network_analyzer::{storage, AnalysisConfig, NetworkReport};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CommunityArg {
    /// Greedy modularity maximisation
    Greedy,
    /// Connected components only
    Components,
}

#[derive(Parser, Debug)]
#[clap(
    name = "station-network-analyzer",
    about = "Station-to-station network analysis of bike-share trips"
)]
struct Cli {
    /// Path to the cleaned trip table (CSV or Parquet)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "network_results")]
    output_dir: String,

    /// Origin station column
    #[clap(long, default_value = "startstationname")]
    origin_column: String,

    /// Destination station column
    #[clap(long, default_value = "endstationname")]
    destination_column: String,

    /// Trip duration column (minutes)
    #[clap(long, default_value = "duration_minutes_calculated")]
    duration_column: String,

    /// Trip length column (kilometers)
    #[clap(long, default_value = "length")]
    distance_column: String,

    /// Number of top PageRank stations considered for path analysis
    #[clap(long, default_value = "15")]
    top_k: usize,

    /// Number of leading candidates used as path sources
    #[clap(long, default_value = "10")]
    paired: usize,

    /// PageRank damping factor
    #[clap(long, default_value = "0.85")]
    damping: f64,

    /// PageRank convergence tolerance
    #[clap(long, default_value = "1e-6")]
    pagerank_tolerance: f64,

    /// PageRank iteration cap
    #[clap(long, default_value = "100")]
    pagerank_max_iter: usize,

    /// Eigenvector centrality convergence tolerance
    #[clap(long, default_value = "1e-6")]
    eigenvector_tolerance: f64,

    /// Eigenvector centrality iteration cap
    #[clap(long, default_value = "1000")]
    eigenvector_max_iter: usize,

    /// Community detection algorithm
    #[clap(long, value_enum, default_value = "greedy")]
    community: CommunityArg,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::new(
            PageRankConfig {
                damping: self.damping,
                tolerance: self.pagerank_tolerance,
                max_iter: self.pagerank_max_iter,
            },
            EigenvectorConfig {
                tolerance: self.eigenvector_tolerance,
                max_iter: self.eigenvector_max_iter,
            },
            PathConfig {
                candidate_count: self.top_k,
                paired_count: self.paired,
                ..PathConfig::default()
            },
            match self.community {
                CommunityArg::Greedy => CommunityStrategy::Greedy,
                CommunityArg::Components => CommunityStrategy::ConnectedComponents,
            },
        )
    }

    fn trip_columns(&self) -> TripColumns {
        TripColumns {
            origin: self.origin_column.clone(),
            destination: self.destination_column.clone(),
            duration: self.duration_column.clone(),
            distance: self.distance_column.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting station network analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load trips
    let trips = load_trips(&args.input, &args.trip_columns())?;

    // 2. Build and analyse the network
    let report = NetworkReport::build(&trips, &args.analysis_config())?;

    log::info!(
        "Analyzed {} stations, {} routes, {} communities",
        report.network.node_count,
        report.network.edge_count,
        report.communities.community_count
    );
    for (rank, record) in report.centrality.records.iter().take(10).enumerate() {
        log::info!("{:>2}. {}: {:.4}", rank + 1, record.station, record.pagerank);
    }

    // 3. Save results
    storage::save_results(&report, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
