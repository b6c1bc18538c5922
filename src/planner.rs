//! Energy-aware route construction.
//!
//! Two strategies are exposed and kept separate:
//!
//! - [`plan_route`] walks the caller's stop order and inserts a charging detour
//!   only when the vehicle needs charging before a leg.
//! - [`route_with_charging`] always routes a single trip through the nearest
//!   station.
//!
//! Neither reorders stops. Both work on a copy of the vehicle and write it back
//! only when the run succeeds.

use std::ops::Range;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PlannerError;
use crate::model::{ChargingStation, Coordinate, WasteCollectionPoint};
use crate::oracle::{DistanceOracle, LegRoute, MeasureSource};
use crate::polyline::RoutePolyline;
use crate::traits::RouteProvider;
use crate::vehicle::ElectricVehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LegKind {
    /// Drive to a waste-collection point.
    Stop { point_id: u32 },
    /// Detour to a charging station, followed by a full recharge.
    Charging { station_id: u32 },
    /// Final leg of a single-trip route.
    Destination,
}

/// One leg appended to the route polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub kind: LegKind,
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_km: f64,
    pub source: MeasureSource,
    /// Index range of this leg inside the polyline.
    pub points: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub polyline: RoutePolyline,
    pub legs: Vec<RouteLeg>,
    pub final_charge_percentage: f64,
}

impl RoutePlan {
    pub fn total_distance_km(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_km).sum()
    }

    /// Station ids in the order they were visited.
    pub fn charging_stops(&self) -> Vec<u32> {
        self.legs
            .iter()
            .filter_map(|leg| match leg.kind {
                LegKind::Charging { station_id } => Some(station_id),
                _ => None,
            })
            .collect()
    }

    /// Polyline slice of a single leg.
    pub fn leg_points(&self, leg: &RouteLeg) -> &[Coordinate] {
        &self.polyline.points()[leg.points.clone()]
    }
}

/// Everything a renderer needs: path, station markers, stop markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningResult {
    pub route: RoutePlan,
    pub stations: Vec<ChargingStation>,
    pub stops: Vec<WasteCollectionPoint>,
}

struct RouteBuilder {
    polyline: RoutePolyline,
    legs: Vec<RouteLeg>,
}

impl RouteBuilder {
    fn new(origin: Coordinate) -> Self {
        Self {
            polyline: RoutePolyline::starting_at(origin),
            legs: Vec::new(),
        }
    }

    fn push(&mut self, kind: LegKind, from: Coordinate, to: Coordinate, leg: LegRoute) -> f64 {
        debug!(?kind, km = leg.distance_km, source = ?leg.source, "appending leg");
        let points = self.polyline.append_leg(&leg.geometry);
        self.legs.push(RouteLeg {
            kind,
            from,
            to,
            distance_km: leg.distance_km,
            source: leg.source,
            points,
        });
        leg.distance_km
    }

    fn finish(self, vehicle: &ElectricVehicle) -> RoutePlan {
        RoutePlan {
            polyline: self.polyline,
            legs: self.legs,
            final_charge_percentage: vehicle.charge_percentage(),
        }
    }
}

/// Plans a route through `stops` in the given order, inserting charging
/// detours where the vehicle needs them.
///
/// The first stop is the starting position and is not charge-checked. Before
/// every following leg, a vehicle at or below the charging threshold detours
/// to the nearest station and recharges to full.
pub fn plan_route<P: RouteProvider>(
    stops: &[WasteCollectionPoint],
    stations: &[ChargingStation],
    vehicle: &mut ElectricVehicle,
    oracle: &DistanceOracle<P>,
) -> Result<PlanningResult, PlannerError> {
    let (first, rest) = stops
        .split_first()
        .ok_or_else(|| PlannerError::invalid("at least one waste collection point is required"))?;
    for stop in stops {
        ensure_finite_stop(stop)?;
    }
    ensure_finite_stations(stations)?;

    let mut working = vehicle.clone();
    let mut current = first.coordinate;
    let mut route = RouteBuilder::new(current);

    for stop in rest {
        if working.needs_charging() {
            let station = nearest_station(current, stations, oracle)?;
            let detour = oracle.route(current, station.coordinate);
            route.push(
                LegKind::Charging {
                    station_id: station.id,
                },
                current,
                station.coordinate,
                detour,
            );
            working.recharge_full();
            debug!(station = station.id, "recharged at station");
            current = station.coordinate;
        }

        let leg = oracle.route(current, stop.coordinate);
        let distance_km = route.push(
            LegKind::Stop { point_id: stop.id },
            current,
            stop.coordinate,
            leg,
        );
        let remaining = working.drive(distance_km);
        debug!(stop = stop.id, name = %stop.name, remaining, "arrived at stop");
        current = stop.coordinate;
    }

    *vehicle = working;
    let route = route.finish(vehicle);
    info!(
        stops = stops.len(),
        legs = route.legs.len(),
        charging_stops = route.charging_stops().len(),
        km = route.total_distance_km(),
        charge = route.final_charge_percentage,
        "planned route"
    );

    Ok(PlanningResult {
        route,
        stations: stations.to_vec(),
        stops: stops.to_vec(),
    })
}

/// Routes `start` to `end` through the nearest station, recharging there
/// whether or not the vehicle needed it.
pub fn route_with_charging<P: RouteProvider>(
    start: Coordinate,
    end: Coordinate,
    stations: &[ChargingStation],
    vehicle: &mut ElectricVehicle,
    oracle: &DistanceOracle<P>,
) -> Result<RoutePlan, PlannerError> {
    if !start.is_finite() || !end.is_finite() {
        return Err(PlannerError::invalid("start and end coordinates must be finite numbers"));
    }
    ensure_finite_stations(stations)?;

    let mut working = vehicle.clone();
    let mut route = RouteBuilder::new(start);

    let station = nearest_station(start, stations, oracle)?;
    route.push(
        LegKind::Charging {
            station_id: station.id,
        },
        start,
        station.coordinate,
        oracle.route(start, station.coordinate),
    );
    working.recharge_full();

    let distance_km = route.push(
        LegKind::Destination,
        station.coordinate,
        end,
        oracle.route(station.coordinate, end),
    );
    working.drive(distance_km);

    *vehicle = working;
    let route = route.finish(vehicle);
    info!(station = station.id, km = route.total_distance_km(), "planned single trip with charging");
    Ok(route)
}

/// Station with the smallest oracle distance from `from`.
///
/// Distances are queried in parallel; ties go to the earliest station.
pub fn nearest_station<'a, P: RouteProvider>(
    from: Coordinate,
    stations: &'a [ChargingStation],
    oracle: &DistanceOracle<P>,
) -> Result<&'a ChargingStation, PlannerError> {
    let distances = stations
        .par_iter()
        .map(|station| oracle.distance_km(from, station.coordinate))
        .collect::<Vec<_>>();

    let mut best: Option<(usize, f64)> = None;
    for (index, distance) in distances.into_iter().enumerate() {
        match best {
            Some((_, best_distance)) if distance.total_cmp(&best_distance).is_ge() => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| &stations[index])
        .ok_or_else(|| PlannerError::invalid("no charging station available"))
}

fn ensure_finite_stop(stop: &WasteCollectionPoint) -> Result<(), PlannerError> {
    if stop.coordinate.is_finite() {
        Ok(())
    } else {
        Err(PlannerError::InvalidInput(format!(
            "waste collection point {} ({}) has non-finite coordinates",
            stop.id, stop.name
        )))
    }
}

fn ensure_finite_stations(stations: &[ChargingStation]) -> Result<(), PlannerError> {
    match stations.iter().find(|station| !station.coordinate.is_finite()) {
        Some(station) => Err(PlannerError::InvalidInput(format!(
            "charging station {} has non-finite coordinates",
            station.id
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::OfflineProvider;

    fn stop(id: u32, lat: f64, lon: f64) -> WasteCollectionPoint {
        WasteCollectionPoint::new(id, format!("P{}", id), Coordinate::new(lat, lon))
    }

    fn oracle() -> DistanceOracle<OfflineProvider> {
        DistanceOracle::new(OfflineProvider)
    }

    #[test]
    fn test_empty_sequence_is_invalid() {
        let mut vehicle = ElectricVehicle::default();
        let err = plan_route(&[], &[], &mut vehicle, &oracle()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[test]
    fn test_single_stop_route() {
        let mut vehicle = ElectricVehicle::default();
        let result = plan_route(&[stop(1, 41.0, 29.0)], &[], &mut vehicle, &oracle()).unwrap();
        assert_eq!(result.route.polyline.points(), &[Coordinate::new(41.0, 29.0)]);
        assert!(result.route.legs.is_empty());
        assert_eq!(vehicle.charge_percentage(), 100.0);
    }

    #[test]
    fn test_non_finite_stop_names_offender() {
        let mut vehicle = ElectricVehicle::default();
        let stops = vec![stop(1, 41.0, 29.0), stop(2, f64::NAN, 29.0)];
        let err = plan_route(&stops, &[], &mut vehicle, &oracle()).unwrap_err();
        assert_eq!(
            err,
            PlannerError::InvalidInput("waste collection point 2 (P2) has non-finite coordinates".to_string())
        );
    }

    #[test]
    fn test_nearest_station_tie_goes_to_first() {
        let stations = vec![
            ChargingStation::new(1, Coordinate::new(1.0, 0.0)),
            ChargingStation::new(2, Coordinate::new(-1.0, 0.0)),
            ChargingStation::new(3, Coordinate::new(0.0, 1.0)),
        ];
        let nearest = nearest_station(Coordinate::new(0.0, 0.0), &stations, &oracle()).unwrap();
        assert_eq!(nearest.id, 1);
    }

    #[test]
    fn test_nearest_station_picks_minimum() {
        let stations = vec![
            ChargingStation::new(1, Coordinate::new(3.0, 0.0)),
            ChargingStation::new(2, Coordinate::new(0.5, 0.0)),
            ChargingStation::new(3, Coordinate::new(0.5, 0.0)),
        ];
        let nearest = nearest_station(Coordinate::new(0.0, 0.0), &stations, &oracle()).unwrap();
        assert_eq!(nearest.id, 2);
    }

    #[test]
    fn test_nearest_station_empty_set() {
        let err = nearest_station(Coordinate::new(0.0, 0.0), &[], &oracle()).unwrap_err();
        assert_eq!(err, PlannerError::InvalidInput("no charging station available".to_string()));
    }

    #[test]
    fn test_failed_run_leaves_vehicle_untouched() {
        // 0.5 degrees is 55.5 km: 100 -> 44.5 -> ~0, third leg needs a station
        let stops = vec![stop(1, 0.0, 0.0), stop(2, 0.5, 0.0), stop(3, 1.0, 0.0), stop(4, 1.5, 0.0)];
        let mut vehicle = ElectricVehicle::default();
        let err = plan_route(&stops, &[], &mut vehicle, &oracle()).unwrap_err();
        assert_eq!(err, PlannerError::InvalidInput("no charging station available".to_string()));
        assert_eq!(vehicle.charge_percentage(), 100.0);
    }

    #[test]
    fn test_non_finite_station_is_rejected() {
        let stations = vec![
            ChargingStation::new(1, Coordinate::new(0.2, 0.0)),
            ChargingStation::new(2, Coordinate::new(f64::NAN, 0.0)),
        ];
        let stops = vec![stop(1, 0.0, 0.0), stop(2, 0.9, 0.0), stop(3, 1.0, 0.0)];
        let expected = PlannerError::InvalidInput("charging station 2 has non-finite coordinates".to_string());

        let mut vehicle = ElectricVehicle::default();
        assert_eq!(plan_route(&stops, &stations, &mut vehicle, &oracle()).unwrap_err(), expected);

        let err = route_with_charging(
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            &stations,
            &mut vehicle,
            &oracle(),
        )
        .unwrap_err();
        assert_eq!(err, expected);
        assert_eq!(vehicle.charge_percentage(), 100.0);
    }

    #[test]
    fn test_leg_points_slice() {
        let stops = vec![stop(1, 0.0, 0.0), stop(2, 0.1, 0.0)];
        let mut vehicle = ElectricVehicle::default();
        let result = plan_route(&stops, &[], &mut vehicle, &oracle()).unwrap();
        let leg = &result.route.legs[0];
        assert_eq!(result.route.leg_points(leg), &[Coordinate::new(0.0, 0.0), Coordinate::new(0.1, 0.0)]);
    }
}
