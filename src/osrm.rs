//! OSRM HTTP adapter for point-to-point routes.

use serde::Deserialize;
use tracing::warn;

use crate::error::ProviderError;
use crate::model::Coordinate;
use crate::traits::{ProviderRoute, RouteProvider};

pub const ENV_BASE_URL: &str = "ROUTING_BASE_URL";
pub const ENV_PROFILE: &str = "ROUTING_PROFILE";
pub const ENV_TIMEOUT_SECS: &str = "ROUTING_TIMEOUT_SECS";

/// Where and how to reach an OSRM server.
#[derive(Debug, Clone, PartialEq)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

impl OsrmConfig {
    /// Defaults overridden by `ROUTING_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(profile) = lookup(ENV_PROFILE) {
            config.profile = profile;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }
        config
    }
}

/// Blocking OSRM client implementing [`RouteProvider`].
#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    /// Creates a client whose requests time out after `config.timeout_secs`.
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: Coordinate, to: Coordinate, query: &str) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.lon,
            from.lat,
            to.lon,
            to.lat,
            query
        )
    }

    fn fetch(&self, url: String) -> Result<OsrmRoute, ProviderError> {
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())?;

        body.routes
            .and_then(|routes| routes.into_iter().next())
            .ok_or(ProviderError::NoRoute)
    }
}

impl RouteProvider for OsrmClient {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> Result<f64, ProviderError> {
        let route = self.fetch(self.route_url(from, to, "overview=false"))?;
        Ok(route.distance / 1000.0)
    }

    fn route(&self, from: Coordinate, to: Coordinate) -> Result<ProviderRoute, ProviderError> {
        let route = self.fetch(self.route_url(from, to, "overview=full&geometries=geojson"))?;
        let geometry = route
            .geometry
            .ok_or(ProviderError::IncompleteResponse("missing geometry"))?
            .coordinates
            .into_iter()
            .map(|[lon, lat]| Coordinate::new(lat, lon))
            .collect::<Vec<_>>();

        if geometry.is_empty() {
            return Err(ProviderError::IncompleteResponse("empty geometry"));
        }

        Ok(ProviderRoute {
            distance_km: route.distance / 1000.0,
            geometry,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Metres.
    distance: f64,
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lon, lat]`.
    coordinates: Vec<[f64; 2]>,
}
