//! Seams between the planner and the outside world.
//!
//! The planner only talks to a routing provider through [`RouteProvider`].
//! Failures are reported here and absorbed one layer up by the distance oracle.

use crate::error::ProviderError;
use crate::model::Coordinate;

/// Road distance and path between two coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    pub distance_km: f64,
    /// Ordered path from origin to destination.
    pub geometry: Vec<Coordinate>,
}

/// A point-to-point routing service.
///
/// Implementations must be `Sync`: the planner queries stations from worker threads.
pub trait RouteProvider: Sync {
    /// Distance-only query.
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> Result<f64, ProviderError>;

    /// Full-geometry query.
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<ProviderRoute, ProviderError>;
}

/// A provider that is never reachable. Planning with it uses the fallback only.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl RouteProvider for OfflineProvider {
    fn distance_km(&self, _from: Coordinate, _to: Coordinate) -> Result<f64, ProviderError> {
        Err(ProviderError::Offline)
    }

    fn route(&self, _from: Coordinate, _to: Coordinate) -> Result<ProviderRoute, ProviderError> {
        Err(ProviderError::Offline)
    }
}

impl<P: RouteProvider + ?Sized> RouteProvider for &P {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> Result<f64, ProviderError> {
        (**self).distance_km(from, to)
    }

    fn route(&self, from: Coordinate, to: Coordinate) -> Result<ProviderRoute, ProviderError> {
        (**self).route(from, to)
    }
}
