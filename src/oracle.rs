//! Infallible distance and geometry lookups over a [`RouteProvider`].
//!
//! Every provider failure is logged and replaced by the fallback metric and a
//! straight two-point line. Each query is attempted once.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::geometry::FallbackMetric;
use crate::model::Coordinate;
use crate::traits::{ProviderRoute, RouteProvider};

/// Where a distance or geometry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureSource {
    Provider,
    Fallback,
}

/// Distance and path for a single origin/destination pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LegRoute {
    pub distance_km: f64,
    /// Starts at the origin and ends at the destination.
    pub geometry: Vec<Coordinate>,
    pub source: MeasureSource,
}

#[derive(Debug, Clone)]
pub struct DistanceOracle<P> {
    provider: P,
    fallback: FallbackMetric,
}

impl<P: RouteProvider> DistanceOracle<P> {
    /// Creates an oracle over `provider` with the planar fallback.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            fallback: FallbackMetric::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackMetric) -> Self {
        self.fallback = fallback;
        self
    }

    /// Distance by the fallback metric alone, without asking the provider.
    pub fn fallback_km(&self, from: Coordinate, to: Coordinate) -> f64 {
        self.fallback.distance_km(from, to)
    }

    /// Road distance in km, or the fallback estimate.
    pub fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
        match self.provider.distance_km(from, to) {
            Ok(km) if km.is_finite() && km >= 0.0 => km,
            Ok(km) => {
                warn!(km, "routing provider returned an unusable distance, using fallback");
                self.fallback_km(from, to)
            }
            Err(err) => {
                warn!(error = %err, "routing provider unavailable, using fallback distance");
                self.fallback_km(from, to)
            }
        }
    }

    /// Distance and geometry from one full-geometry query.
    pub fn route(&self, from: Coordinate, to: Coordinate) -> LegRoute {
        match self.provider.route(from, to) {
            Ok(ProviderRoute {
                distance_km,
                geometry,
            }) if distance_km.is_finite() && distance_km >= 0.0 => LegRoute {
                distance_km,
                geometry: anchor(geometry, from, to),
                source: MeasureSource::Provider,
            },
            Ok(route) => {
                warn!(km = route.distance_km, "routing provider returned an unusable route, using fallback");
                self.straight_line(from, to)
            }
            Err(err) => {
                warn!(error = %err, "routing provider unavailable, using straight-line geometry");
                self.straight_line(from, to)
            }
        }
    }

    fn straight_line(&self, from: Coordinate, to: Coordinate) -> LegRoute {
        LegRoute {
            distance_km: self.fallback_km(from, to),
            geometry: vec![from, to],
            source: MeasureSource::Fallback,
        }
    }
}

/// Pins provider geometry to the exact endpoints so consecutive legs join up.
fn anchor(mut geometry: Vec<Coordinate>, from: Coordinate, to: Coordinate) -> Vec<Coordinate> {
    if geometry.first() != Some(&from) {
        geometry.insert(0, from);
    }
    if geometry.last() != Some(&to) {
        geometry.push(to);
    }
    geometry
}
