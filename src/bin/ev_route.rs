use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing::info;

use ev_route_planner::geometry::FallbackMetric;
use ev_route_planner::input::{StopRecord, parse_catalog, validate_stops};
use ev_route_planner::osrm::{OsrmClient, OsrmConfig};
use ev_route_planner::placement::{PlacementOptions, place_stations};
use ev_route_planner::traits::{OfflineProvider, RouteProvider};
use ev_route_planner::{DistanceOracle, ElectricVehicle, plan_route};

#[derive(Parser)]
#[clap(author, version, about = "Plan an electric waste-collection route with charging stops", long_about = None)]
struct Cli {
    /// JSON demand-point catalog used to place charging stations.
    #[arg(short, long)]
    catalog: PathBuf,

    /// JSON array of `{name, latitude, longitude}` stops, in visiting order.
    #[arg(short, long, conflicts_with = "stop")]
    stops: Option<PathBuf>,

    /// Catalog location to visit, repeatable, in visiting order.
    #[arg(long)]
    stop: Vec<String>,

    /// Number of charging stations to place.
    #[arg(long, default_value_t = 3)]
    stations: usize,

    /// Seed for station placement.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Starting battery percentage.
    #[arg(long, default_value_t = 100.0)]
    start_charge: f64,

    /// Skip the routing provider and use straight lines only.
    #[arg(long)]
    offline: bool,

    #[arg(long, value_enum, default_value_t = Fallback::Planar)]
    fallback: Fallback,

    /// Write the planning result here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Fallback {
    Planar,
    Haversine,
}

impl From<Fallback> for FallbackMetric {
    fn from(value: Fallback) -> Self {
        match value {
            Fallback::Planar => FallbackMetric::Planar,
            Fallback::Haversine => FallbackMetric::Haversine,
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let catalog_json = fs::read_to_string(&cli.catalog)
        .with_context(|| format!("reading catalog {}", cli.catalog.display()))?;
    let catalog = parse_catalog(&catalog_json)?;

    let records = match &cli.stops {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading stops {}", path.display()))?;
            serde_json::from_str::<Vec<StopRecord>>(&raw).context("parsing stops file")?
        }
        None => cli
            .stop
            .iter()
            .map(|name| {
                StopRecord::from_catalog(name, &catalog)
                    .with_context(|| format!("stop {:?} is not in the catalog", name))
            })
            .collect::<Result<Vec<_>, _>>()?,
    };
    if records.is_empty() {
        bail!("no stops given, use --stops or --stop");
    }
    let stops = validate_stops(&records)?;

    let options = PlacementOptions {
        station_count: cli.stations,
        seed: cli.seed,
        ..PlacementOptions::default()
    };
    let stations = place_stations(&catalog, &options)?;

    let osrm;
    let provider: &dyn RouteProvider = if cli.offline {
        &OfflineProvider
    } else {
        let config = OsrmConfig::from_env();
        info!(base_url = %config.base_url, profile = %config.profile, "using routing provider");
        osrm = OsrmClient::new(config).context("building routing client")?;
        &osrm
    };
    let oracle = DistanceOracle::new(provider).with_fallback(cli.fallback.into());

    let mut vehicle = ElectricVehicle::new(1).with_charge(cli.start_charge);
    let result = plan_route(&stops, &stations, &mut vehicle, &oracle)?;

    let json = serde_json::to_string_pretty(&result)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote planning result");
        }
        None => println!("{}", json),
    }

    Ok(())
}
