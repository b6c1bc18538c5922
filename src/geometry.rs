//! Analytic distance estimates used when the routing provider is unavailable.
//!
//! Both metrics ignore the road network. They are deterministic and symmetric,
//! so the planner stays reproducible without network access.

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// Kilometres per degree used by the planar approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line metric applied by the distance oracle on provider failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMetric {
    /// Euclidean distance in degrees scaled by [`KM_PER_DEGREE`].
    #[default]
    Planar,
    /// Great-circle distance.
    Haversine,
}

impl FallbackMetric {
    pub fn distance_km(self, from: Coordinate, to: Coordinate) -> f64 {
        match self {
            FallbackMetric::Planar => planar_km(from, to),
            FallbackMetric::Haversine => haversine_km(from, to),
        }
    }
}

pub fn planar_km(from: Coordinate, to: Coordinate) -> f64 {
    let delta_lat = to.lat - from.lat;
    let delta_lon = to.lon - from.lon;
    (delta_lat * delta_lat + delta_lon * delta_lon).sqrt() * KM_PER_DEGREE
}

/// Calculate haversine distance between two points in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
