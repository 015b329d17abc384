//! Speed and distance unit conversion
//!
//! Speed limits are held as whole miles per hour, vehicle speed arrives in
//! meters per second. Conversions used for display truncate toward zero.

use serde::{Deserialize, Serialize};

/// Meters per second to miles per hour
pub const MPS_TO_MPH: f32 = 2.237;
/// Meters per second to kilometers per hour
pub const MPS_TO_KPH: f32 = 3.6;
/// Miles per hour to kilometers per hour
pub const MPH_TO_KPH: f32 = 1.609;
/// Meters to feet
pub const METERS_TO_FEET: f32 = 3.281;

/// Unit preference for display and speech. Does not affect decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    Imperial,
    #[default]
    Both,
}

impl Units {
    /// Unit of the on-screen speed readout. `Both` displays imperial.
    pub fn display_unit(&self) -> DisplayUnit {
        match self {
            Units::Metric => DisplayUnit::Kph,
            Units::Imperial | Units::Both => DisplayUnit::Mph,
        }
    }
}

/// Unit of a displayed speed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    Mph,
    Kph,
}

/// Meters per second to whole miles per hour
pub fn mps_to_mph(speed: f32) -> u32 {
    (speed * MPS_TO_MPH) as u32
}

/// Meters per second to whole kilometers per hour
pub fn mps_to_kph(speed: f32) -> u32 {
    (speed * MPS_TO_KPH) as u32
}

/// Whole miles per hour to meters per second
pub fn mph_to_mps(mph: u32) -> f32 {
    mph as f32 / MPS_TO_MPH
}

/// Miles per hour to kilometers per hour, fractional
pub fn mph_to_kph(mph: f32) -> f32 {
    mph * MPH_TO_KPH
}

pub fn meters_to_feet(meters: f32) -> f32 {
    meters * METERS_TO_FEET
}
