//! Battery state of a single electric collection vehicle.

use serde::{Deserialize, Serialize};

/// Charge level at or below which the vehicle must visit a station.
pub const CHARGING_THRESHOLD_PERCENT: f64 = 20.0;

/// Battery percentage consumed per kilometre driven.
pub const CONSUMPTION_PERCENT_PER_KM: f64 = 1.0;

const FULL_CHARGE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricVehicle {
    pub id: u32,
    /// Nominal range in km. Not consulted by the planner.
    pub max_range_km: f64,
    charge_percentage: f64,
    /// Percent of capacity restored per hour at a station.
    pub charging_rate_percent_per_hour: f64,
}

impl Default for ElectricVehicle {
    fn default() -> Self {
        Self {
            id: 1,
            max_range_km: 500.0,
            charge_percentage: FULL_CHARGE,
            charging_rate_percent_per_hour: 200.0,
        }
    }
}

impl ElectricVehicle {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_charge(mut self, percentage: f64) -> Self {
        self.charge_percentage = clamp_charge(percentage);
        self
    }

    pub fn charge_percentage(&self) -> f64 {
        self.charge_percentage
    }

    /// Consumes charge for `distance_km` and returns the remaining level.
    pub fn drive(&mut self, distance_km: f64) -> f64 {
        let consumed = distance_km * CONSUMPTION_PERCENT_PER_KM;
        self.charge_percentage = clamp_charge(self.charge_percentage - consumed);
        self.charge_percentage
    }

    pub fn needs_charging(&self) -> bool {
        self.charge_percentage <= CHARGING_THRESHOLD_PERCENT
    }

    /// Charges for `duration_minutes` at the vehicle's charging rate.
    pub fn charge(&mut self, duration_minutes: f64) -> f64 {
        let gained = duration_minutes * (self.charging_rate_percent_per_hour / 60.0);
        self.charge_percentage = clamp_charge(self.charge_percentage + gained);
        self.charge_percentage
    }

    /// Instant full recharge, as applied on arrival at a station during planning.
    pub fn recharge_full(&mut self) {
        self.charge_percentage = FULL_CHARGE;
    }
}

fn clamp_charge(percentage: f64) -> f64 {
    percentage.clamp(0.0, FULL_CHARGE)
}
