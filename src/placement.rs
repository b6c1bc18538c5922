//! Charging-station placement by k-means over demand-point coordinates.

use linfa::prelude::*;
use linfa_clustering::KMeans;
use ndarray::Array;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::error::PlannerError;
use crate::model::{ChargingStation, Coordinate, DEFAULT_STATION_CAPACITY, DemandPoint};

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementOptions {
    /// Number of stations (clusters) to place.
    pub station_count: usize,
    pub station_capacity: u32,
    /// Seed for centroid initialisation. Same seed and catalog, same stations.
    pub seed: u64,
    pub max_iterations: u64,
    pub tolerance: f64,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            station_count: 3,
            station_capacity: DEFAULT_STATION_CAPACITY,
            seed: 42,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

/// Places one station per demand cluster, ids starting at 1.
///
/// With fewer usable points than `station_count`, each point gets its own
/// station at its exact coordinate, in catalog order. Points with non-finite
/// coordinates are ignored.
pub fn place_stations(
    demand_points: &[DemandPoint],
    options: &PlacementOptions,
) -> Result<Vec<ChargingStation>, PlannerError> {
    let coordinates = demand_points
        .iter()
        .filter(|point| {
            let usable = point.coordinate.is_finite();
            if !usable {
                warn!(name = %point.name, "skipping demand point with non-finite coordinates");
            }
            usable
        })
        .map(|point| point.coordinate)
        .collect::<Vec<_>>();

    if coordinates.is_empty() || options.station_count == 0 {
        info!("insufficient demand data, no charging stations placed");
        return Ok(Vec::new());
    }

    let centers = if coordinates.len() <= options.station_count {
        debug!(
            points = coordinates.len(),
            requested = options.station_count,
            "fewer demand points than stations, placing one station per point"
        );
        coordinates
    } else {
        cluster_centroids(&coordinates, options)?
    };

    let stations = centers
        .into_iter()
        .zip(1..)
        .map(|(center, id)| ChargingStation::new(id, center).with_capacity(options.station_capacity))
        .collect::<Vec<_>>();

    info!(stations = stations.len(), "placed charging stations");
    Ok(stations)
}

fn cluster_centroids(
    coordinates: &[Coordinate],
    options: &PlacementOptions,
) -> Result<Vec<Coordinate>, PlannerError> {
    let flat = coordinates
        .iter()
        .flat_map(|coordinate| [coordinate.lat, coordinate.lon])
        .collect::<Vec<_>>();
    let observations = Array::from_shape_vec((coordinates.len(), 2), flat)
        .map_err(|err| PlannerError::Clustering(err.to_string()))?;
    let dataset = Dataset::from(observations);

    let model = KMeans::params_with_rng(options.station_count, StdRng::seed_from_u64(options.seed))
        .max_n_iterations(options.max_iterations)
        .tolerance(options.tolerance)
        .fit(&dataset)
        .map_err(|err| PlannerError::Clustering(err.to_string()))?;

    Ok(model
        .centroids()
        .rows()
        .into_iter()
        .map(|row| Coordinate::new(row[0], row[1]))
        .collect())
}
