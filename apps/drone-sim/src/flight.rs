//! Simulated flight model: position drift, battery drain, return-to-base.

use chrono::Utc;
use odyssey_common::TelemetrySample;
use rand::Rng;

/// Launch position (Los Angeles City Hall).
pub const HOME_LATITUDE: f64 = 34.052235;
pub const HOME_LONGITUDE: f64 = -118.243683;

const CRUISE_ALTITUDE_M: f64 = 100.0;
/// Maximum random drift per step while flying, in degrees.
const DRIFT_DEG: f64 = 0.0005;
/// Fraction of the remaining distance covered per step when heading home.
const HOMING_RATE: f64 = 0.1;
/// Distance from home, in degrees, that counts as arrived.
const ARRIVAL_DEG: f64 = 0.0001;
const LOW_BATTERY: f64 = 0.1;
const DRAIN_PER_STEP: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    Idle,
    Flying,
    ReturningToBase,
}

impl FlightStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FlightStatus::Idle => "idle",
            FlightStatus::Flying => "flying",
            FlightStatus::ReturningToBase => "returning_to_base",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DroneState {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub battery_level: f64,
    pub status: FlightStatus,
}

impl Default for DroneState {
    fn default() -> Self {
        Self {
            latitude: HOME_LATITUDE,
            longitude: HOME_LONGITUDE,
            altitude: CRUISE_ALTITUDE_M,
            battery_level: 1.0,
            status: FlightStatus::Idle,
        }
    }
}

impl DroneState {
    /// Advance the simulation by one tick.
    pub fn step(&mut self, rng: &mut impl Rng) {
        match self.status {
            FlightStatus::ReturningToBase => {
                let lat_diff = HOME_LATITUDE - self.latitude;
                let lon_diff = HOME_LONGITUDE - self.longitude;
                self.latitude += lat_diff * HOMING_RATE;
                self.longitude += lon_diff * HOMING_RATE;
                if lat_diff.abs() < ARRIVAL_DEG && lon_diff.abs() < ARRIVAL_DEG {
                    self.status = FlightStatus::Idle;
                }
            }
            FlightStatus::Flying => {
                self.latitude += rng.gen_range(-DRIFT_DEG..=DRIFT_DEG);
                self.longitude += rng.gen_range(-DRIFT_DEG..=DRIFT_DEG);
            }
            FlightStatus::Idle => {}
        }

        if self.status == FlightStatus::Idle && self.battery_level > LOW_BATTERY {
            self.status = FlightStatus::Flying;
        }
        if self.battery_level <= LOW_BATTERY && self.status != FlightStatus::Idle {
            self.status = FlightStatus::ReturningToBase;
        }
        if self.status != FlightStatus::Idle {
            self.battery_level -= DRAIN_PER_STEP;
        }
        self.battery_level = self.battery_level.max(0.0);
    }

    /// Order the drone home.
    pub fn return_to_base(&mut self) {
        self.status = FlightStatus::ReturningToBase;
    }

    pub fn sample(&self, drone_id: &str) -> TelemetrySample {
        TelemetrySample {
            drone_id: drone_id.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            battery_level: (self.battery_level * 10_000.0).round() / 10_000.0,
            status: self.status.as_str().to_string(),
        }
    }
}
