//! Validation of caller-supplied stops and demand-point catalogs.
//!
//! Stops arrive as text, the way a data-entry form produces them. Catalog rows
//! use the column names of the location spreadsheet (`Mahalleler`, `X`, `Y`)
//! or their plain equivalents.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::PlannerError;
use crate::model::{Coordinate, DemandPoint, WasteCollectionPoint};

/// An unvalidated stop entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
}

impl StopRecord {
    pub fn new(name: impl Into<String>, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Fills a stop from the catalog entry with the given name.
    pub fn from_catalog(name: &str, catalog: &[DemandPoint]) -> Option<Self> {
        catalog.iter().find(|point| point.name == name).map(|point| {
            Self::new(
                point.name.clone(),
                point.coordinate.lat.to_string(),
                point.coordinate.lon.to_string(),
            )
        })
    }
}

/// Turns stop entries into numbered collection points, ids 1..=n in order.
///
/// Fails on the first entry whose coordinates are not finite numbers, naming it.
pub fn validate_stops(records: &[StopRecord]) -> Result<Vec<WasteCollectionPoint>, PlannerError> {
    if records.is_empty() {
        return Err(PlannerError::invalid("at least one waste collection point is required"));
    }

    records
        .iter()
        .zip(1u32..)
        .map(|(record, id)| {
            let lat = parse_coordinate(&record.latitude);
            let lon = parse_coordinate(&record.longitude);
            match (lat, lon) {
                (Some(lat), Some(lon)) => Ok(WasteCollectionPoint::new(
                    id,
                    record.name.clone(),
                    Coordinate::new(lat, lon),
                )),
                _ => Err(PlannerError::InvalidInput(format!(
                    "invalid coordinates for waste collection point {} ({}): latitude {:?}, longitude {:?}",
                    id, record.name, record.latitude, record.longitude
                ))),
            }
        })
        .collect()
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogValue {
    Number(f64),
    Text(String),
}

impl CatalogValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            CatalogValue::Number(value) => Some(*value).filter(|v| v.is_finite()),
            CatalogValue::Text(raw) => parse_coordinate(raw),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default, alias = "Mahalleler")]
    name: Option<String>,
    #[serde(default, alias = "Y", alias = "lat")]
    latitude: Option<CatalogValue>,
    #[serde(default, alias = "X", alias = "lon")]
    longitude: Option<CatalogValue>,
}

/// Parses a JSON array of catalog rows.
///
/// Rows that are not objects, have fields of the wrong type, or lack a name
/// or a usable coordinate are skipped. Only a document that is not a JSON
/// array is rejected.
pub fn parse_catalog(json: &str) -> Result<Vec<DemandPoint>, PlannerError> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|err| PlannerError::InvalidInput(format!("malformed demand-point catalog: {}", err)))?;
    let total = rows.len();

    let points = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let row = match serde_json::from_value::<CatalogRow>(value) {
                Ok(row) => row,
                Err(err) => {
                    warn!(row = index + 1, error = %err, "skipping malformed catalog row");
                    return None;
                }
            };
            let name = row.name.map(|name| name.trim().to_string()).filter(|name| !name.is_empty());
            let lat = row.latitude.as_ref().and_then(CatalogValue::as_f64);
            let lon = row.longitude.as_ref().and_then(CatalogValue::as_f64);
            match (name, lat, lon) {
                (Some(name), Some(lat), Some(lon)) => Some(DemandPoint::new(name, Coordinate::new(lat, lon))),
                _ => {
                    warn!(row = index + 1, "skipping incomplete catalog row");
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    if points.is_empty() {
        warn!("demand-point catalog has no usable rows");
    } else {
        info!(loaded = points.len(), skipped = total - points.len(), "loaded demand-point catalog");
    }
    Ok(points)
}
