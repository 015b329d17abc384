//! Vehicle speed telemetry

use serde::{Deserialize, Serialize};
use tracing::debug;

use alerting::TimestampMs;

use crate::units::mps_to_mph;
use crate::AdasError;

/// One vehicle speed reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedSample {
    /// Speed over ground (m/s)
    pub speed_mps: f32,
    pub timestamp_ms: TimestampMs,
}

impl SpeedSample {
    /// Validated sample. Speed must be finite and non-negative.
    pub fn new(speed_mps: f32, timestamp_ms: TimestampMs) -> Result<Self, AdasError> {
        if !speed_mps.is_finite() || speed_mps < 0.0 {
            return Err(AdasError::InvalidSpeed(speed_mps));
        }
        Ok(Self {
            speed_mps,
            timestamp_ms,
        })
    }
}

/// Latest and previous speed sample
#[derive(Debug, Clone, Default)]
pub struct VehicleTelemetry {
    latest: Option<SpeedSample>,
    previous: Option<SpeedSample>,
}

impl VehicleTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new sample. Samples older than the held one are rejected.
    pub fn update(&mut self, sample: SpeedSample) -> Result<(), AdasError> {
        if let Some(latest) = self.latest {
            if sample.timestamp_ms < latest.timestamp_ms {
                return Err(AdasError::NonMonotonicTimestamp {
                    previous: latest.timestamp_ms,
                    current: sample.timestamp_ms,
                });
            }
        }
        self.previous = self.latest.replace(sample);
        debug!("Speed sample {:.2} m/s at {} ms", sample.speed_mps, sample.timestamp_ms);
        Ok(())
    }

    pub fn latest(&self) -> Option<SpeedSample> {
        self.latest
    }

    pub fn speed_mps(&self) -> Option<f32> {
        self.latest.map(|s| s.speed_mps)
    }

    /// Δspeed/Δt between the two held samples (m/s²)
    pub fn acceleration(&self) -> Option<f32> {
        let (latest, previous) = (self.latest?, self.previous?);
        let dt_ms = latest.timestamp_ms.checked_sub(previous.timestamp_ms)?;
        if dt_ms == 0 {
            return None;
        }
        Some((latest.speed_mps - previous.speed_mps) / (dt_ms as f32 / 1000.0))
    }

    /// Distance covered in `time_s` seconds at the current speed and
    /// acceleration: `v·t + ½·a·t²`. Acceleration counts as zero until known.
    pub fn distance_to_crash(&self, time_s: f32) -> Option<f32> {
        let v = self.speed_mps()?;
        let a = self.acceleration().unwrap_or(0.0);
        Some(v * time_s + 0.5 * a * time_s * time_s)
    }

    /// Whether the vehicle reads 0 mph
    pub fn is_stationary(&self) -> Option<bool> {
        self.speed_mps().map(|v| mps_to_mph(v) == 0)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
