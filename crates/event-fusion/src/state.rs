//! Session state

use adas::{CollisionAggregator, SpeedLimit, Units, VehicleTelemetry};
use alerting::{AlertClock, AlertConfig};
use poi::{GeoCoordinate, PoiSet};

/// All mutable state of one driving session.
///
/// Owned by a single consumer; producers on other threads must funnel their
/// events through one channel or one mutex.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Currently posted limit, replaced and never accumulated
    pub speed_limit: Option<SpeedLimit>,

    /// Per-class alert timestamps
    pub clock: AlertClock,

    /// Latest and previous speed sample
    pub telemetry: VehicleTelemetry,

    /// Last known vehicle position
    pub location: Option<GeoCoordinate>,

    /// Collision set of the latest frame
    pub collisions: CollisionAggregator,

    /// Nearby places and destination
    pub pois: PoiSet,

    /// Camera calibration finished
    pub calibrated: bool,

    /// Limit panels revealed for the first positive limit
    pub limit_shown: bool,

    pub units: Units,
}

impl SessionState {
    pub fn new(alerting: AlertConfig, units: Units) -> Self {
        Self {
            clock: AlertClock::new(alerting),
            units,
            ..Default::default()
        }
    }
}
