//! Test fixtures for ev-route-planner.
//!
//! Provides Istanbul district centres usable both as a demand-point catalog
//! and as collection stops.

pub mod istanbul_locations;

pub use istanbul_locations::*;
