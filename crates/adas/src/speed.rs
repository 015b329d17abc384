//! Speed against posted limit

use serde::{Deserialize, Serialize};
use tracing::debug;

use alerting::{AlertClass, AlertClock, AlertRequest, MessageKey, TimestampMs};

use crate::sign::SpeedLimit;
use crate::units::{mph_to_kph, mph_to_mps, mps_to_kph, mps_to_mph, DisplayUnit, Units};
use crate::AdasConfig;

/// Speed compared with the held limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedAssessment {
    /// Vehicle speed in `unit`
    pub display_speed: u32,
    /// Speed limit in `unit`
    pub display_limit: u32,
    pub unit: DisplayUnit,
    pub over_limit: bool,
    /// Overspeed tint, `None` when at or under the limit
    pub intensity: Option<f32>,
    /// Far enough over the limit to warrant "slow down"
    pub wants_announcement: bool,
}

/// Assessment plus the alert that passed the debounce clock
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedReport {
    pub assessment: SpeedAssessment,
    pub alert: Option<AlertRequest>,
}

/// Speed/limit monitor
pub struct SpeedMonitor {
    overspeed_margin_mph: u32,
    intensity_scale: f32,
    intensity_cap: f32,
}

impl SpeedMonitor {
    pub fn new(config: &AdasConfig) -> Self {
        Self {
            overspeed_margin_mph: config.overspeed_margin_mph,
            intensity_scale: config.intensity_scale,
            intensity_cap: config.intensity_cap,
        }
    }

    /// Compare a speed against a limit. Pure.
    pub fn assess(&self, speed_mps: f32, limit: &SpeedLimit, units: Units) -> SpeedAssessment {
        let limit_mph = limit.whole_mph();
        let limit_mps = mph_to_mps(limit_mph);
        let speed_mph = mps_to_mph(speed_mps);

        let unit = units.display_unit();
        let (display_speed, display_limit) = match unit {
            DisplayUnit::Kph => (mps_to_kph(speed_mps), mph_to_kph(limit_mph as f32) as u32),
            DisplayUnit::Mph => (speed_mph, limit_mph),
        };

        let over_limit = limit_mph > 0 && speed_mps > limit_mps;
        let intensity = over_limit.then(|| {
            (self.intensity_scale * speed_mps / limit_mps)
                .min(self.intensity_cap)
                .max(0.0)
        });
        let wants_announcement =
            over_limit && speed_mph >= limit_mph.saturating_add(self.overspeed_margin_mph);

        SpeedAssessment {
            display_speed,
            display_limit,
            unit,
            over_limit,
            intensity,
            wants_announcement,
        }
    }

    /// Assess and gate the "slow down" alert through the debounce clock.
    ///
    /// Inert until a speed limit is known.
    pub fn evaluate(
        &self,
        speed_mps: f32,
        limit: Option<&SpeedLimit>,
        units: Units,
        clock: &mut AlertClock,
        now: TimestampMs,
    ) -> Option<SpeedReport> {
        let Some(limit) = limit else {
            debug!("No speed limit known, monitor inert");
            return None;
        };

        let assessment = self.assess(speed_mps, limit, units);
        let alert = (assessment.wants_announcement && clock.try_fire(AlertClass::Overspeed, now))
            .then(|| AlertRequest::simple(AlertClass::Overspeed, MessageKey::Slow));

        Some(SpeedReport { assessment, alert })
    }
}
