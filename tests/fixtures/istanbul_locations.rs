//! Istanbul district centres for realistic fixtures.
//!
//! Approximate coordinates; routable with an OSRM Turkey extract.

use ev_route_planner::input::StopRecord;
use ev_route_planner::{Coordinate, DemandPoint};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }

    pub fn demand_point(&self) -> DemandPoint {
        DemandPoint::new(self.name, self.coordinate())
    }

    pub fn stop_record(&self) -> StopRecord {
        StopRecord::new(self.name, self.lat.to_string(), self.lon.to_string())
    }
}

// ============================================================================
// European side
// ============================================================================

pub const EUROPEAN_SIDE: &[Location] = &[
    Location::new("Silivri", 41.0739, 28.2464),
    Location::new("Çatalca", 41.1436, 28.4611),
    Location::new("Beylikdüzü", 40.9826, 28.6400),
    Location::new("Esenyurt", 41.0343, 28.6801),
    Location::new("Arnavutköy", 41.1846, 28.7400),
    Location::new("Başakşehir", 41.0931, 28.8020),
    Location::new("Bakırköy", 40.9800, 28.8772),
    Location::new("Zeytinburnu", 40.9940, 28.9040),
    Location::new("Eyüpsultan", 41.0478, 28.9336),
    Location::new("Fatih", 41.0186, 28.9497),
    Location::new("Şişli", 41.0602, 28.9877),
    Location::new("Beşiktaş", 41.0422, 29.0083),
    Location::new("Sarıyer", 41.1670, 29.0570),
];

// ============================================================================
// Asian side
// ============================================================================

pub const ASIAN_SIDE: &[Location] = &[
    Location::new("Beykoz", 41.1340, 29.0920),
    Location::new("Üsküdar", 41.0233, 29.0152),
    Location::new("Kadıköy", 40.9903, 29.0290),
    Location::new("Ümraniye", 41.0166, 29.1248),
    Location::new("Ataşehir", 40.9923, 29.1244),
    Location::new("Çekmeköy", 41.0335, 29.1780),
    Location::new("Maltepe", 40.9357, 29.1552),
    Location::new("Kartal", 40.8889, 29.1856),
    Location::new("Sultanbeyli", 40.9610, 29.2710),
    Location::new("Pendik", 40.8770, 29.2330),
    Location::new("Tuzla", 40.8161, 29.3006),
    Location::new("Şile", 41.1760, 29.6120),
];

pub fn all_locations() -> Vec<Location> {
    EUROPEAN_SIDE.iter().chain(ASIAN_SIDE).cloned().collect()
}

/// The catalog as JSON rows with spreadsheet column names.
pub fn catalog_json() -> String {
    let rows = all_locations()
        .iter()
        .map(|loc| serde_json::json!({"Mahalleler": loc.name, "X": loc.lon, "Y": loc.lat}))
        .collect::<Vec<_>>();
    serde_json::Value::Array(rows).to_string()
}
