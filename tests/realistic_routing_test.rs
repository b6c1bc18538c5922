//! End-to-end planning over real Istanbul district coordinates.
//!
//! Catalog parsing, station placement, stop validation and planning run
//! together here, with the fallback metrics standing in for road routing.

mod fixtures;

use ev_route_planner::geometry::FallbackMetric;
use ev_route_planner::input::{StopRecord, parse_catalog, validate_stops};
use ev_route_planner::placement::{PlacementOptions, place_stations};
use ev_route_planner::planner::LegKind;
use ev_route_planner::traits::OfflineProvider;
use ev_route_planner::{DistanceOracle, ElectricVehicle, plan_route};

use fixtures::istanbul_locations::{self, ASIAN_SIDE, EUROPEAN_SIDE};

fn west_to_east_stops() -> Vec<StopRecord> {
    EUROPEAN_SIDE
        .iter()
        .chain(ASIAN_SIDE)
        .map(|loc| loc.stop_record())
        .collect()
}

#[test]
fn catalog_round_trip_places_three_stations() {
    let catalog = parse_catalog(&istanbul_locations::catalog_json()).unwrap();
    assert_eq!(catalog.len(), istanbul_locations::all_locations().len());

    let stations = place_stations(&catalog, &PlacementOptions::default()).unwrap();
    assert_eq!(stations.len(), 3);
    for station in &stations {
        assert!(station.coordinate.lat > 40.8 && station.coordinate.lat < 41.2);
        assert!(station.coordinate.lon > 28.2 && station.coordinate.lon < 29.7);
    }
}

#[test]
fn placement_is_reproducible_for_identical_catalogs() {
    let catalog = parse_catalog(&istanbul_locations::catalog_json()).unwrap();
    let options = PlacementOptions::default();
    let first = place_stations(&catalog, &options).unwrap();
    let second = place_stations(&catalog, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cross_city_route_needs_charging() {
    let catalog = parse_catalog(&istanbul_locations::catalog_json()).unwrap();
    let stations = place_stations(&catalog, &PlacementOptions::default()).unwrap();
    let stops = validate_stops(&west_to_east_stops()).unwrap();
    let oracle = DistanceOracle::new(OfflineProvider).with_fallback(FallbackMetric::Haversine);
    let mut vehicle = ElectricVehicle::default();

    let result = plan_route(&stops, &stations, &mut vehicle, &oracle).unwrap();

    let visited = result
        .route
        .legs
        .iter()
        .filter_map(|leg| match leg.kind {
            LegKind::Stop { point_id } => Some(point_id),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(visited, (2..=stops.len() as u32).collect::<Vec<_>>());

    assert!(
        !result.route.charging_stops().is_empty(),
        "a {:.0} km cross-city route should stop to charge",
        result.route.total_distance_km()
    );
    assert!(result.route.charging_stops().iter().all(|id| (1..=3).contains(id)));

    assert_eq!(result.route.polyline.points().first(), Some(&stops[0].coordinate));
    assert_eq!(result.route.polyline.last(), stops.last().map(|s| s.coordinate));
    assert_eq!(vehicle.charge_percentage(), result.route.final_charge_percentage);
}

#[test]
fn short_asian_side_loop_needs_no_charging() {
    let records = ["Üsküdar", "Kadıköy", "Ataşehir", "Ümraniye"]
        .iter()
        .map(|name| {
            let catalog = ASIAN_SIDE.iter().map(|loc| loc.demand_point()).collect::<Vec<_>>();
            StopRecord::from_catalog(name, &catalog).unwrap()
        })
        .collect::<Vec<_>>();
    let stops = validate_stops(&records).unwrap();
    let oracle = DistanceOracle::new(OfflineProvider);
    let mut vehicle = ElectricVehicle::default();

    let result = plan_route(&stops, &[], &mut vehicle, &oracle).unwrap();

    assert_eq!(result.route.legs.len(), 3);
    assert!(result.route.charging_stops().is_empty());
    assert!(vehicle.charge_percentage() > 70.0);
}
