//! Domain records shared by placement, planning and rendering.

use serde::{Deserialize, Serialize};

/// Default number of vehicles a station can charge at once.
pub const DEFAULT_STATION_CAPACITY: u32 = 2;

/// A (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude in degrees.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when neither component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coordinate: Coordinate) -> Self {
        (coordinate.lat, coordinate.lon)
    }
}

/// A named catalog location available for selection and clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandPoint {
    pub name: String,
    pub coordinate: Coordinate,
}

impl DemandPoint {
    /// Creates a named catalog location.
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }
}

/// A stop the vehicle must visit. `id` is 1-based and follows display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteCollectionPoint {
    pub id: u32,
    pub name: String,
    pub coordinate: Coordinate,
}

impl WasteCollectionPoint {
    /// Creates a stop. Callers assign ids 1..=n in visiting order.
    pub fn new(id: u32, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coordinate,
        }
    }
}

/// A charging station. Capacity is recorded for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargingStation {
    pub id: u32,
    pub coordinate: Coordinate,
    pub capacity: u32,
}

impl ChargingStation {
    /// Creates a station with [`DEFAULT_STATION_CAPACITY`].
    pub fn new(id: u32, coordinate: Coordinate) -> Self {
        Self {
            id,
            coordinate,
            capacity: DEFAULT_STATION_CAPACITY,
        }
    }

    /// Overrides the capacity. Zero is raised to one.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity.max(1);
        self
    }
}
