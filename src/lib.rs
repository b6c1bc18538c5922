//! ev-route-planner core
//!
//! Energy-aware route construction for electric waste-collection vehicles:
//! charging-station placement, battery model, routing-provider access with a
//! deterministic fallback, and greedy charging-detour insertion.

pub mod error;
pub mod model;
pub mod vehicle;
pub mod traits;
pub mod osrm;
pub mod geometry;
pub mod oracle;
pub mod polyline;
pub mod placement;
pub mod planner;
pub mod input;

pub use error::{PlannerError, ProviderError};
pub use model::{ChargingStation, Coordinate, DemandPoint, WasteCollectionPoint};
pub use oracle::DistanceOracle;
pub use planner::{PlanningResult, RoutePlan, plan_route, route_with_charging};
pub use vehicle::ElectricVehicle;
