//! Advanced Driver Assistance decisions
//!
//! Turns perception and telemetry output into driver alerts:
//! - Traffic sign interpretation with per-type confidence gates
//! - Speed limit monitoring and overspeed warnings
//! - Collision risk aggregation
//! - Speed and distance unit conversion

pub mod config;
pub mod object;
pub mod sign;
pub mod speed;
pub mod telemetry;
pub mod units;
pub mod visual;

pub use config::AdasConfig;
pub use object::{CollisionAggregator, CollisionObject, DangerLevel};
pub use sign::{
    limit_announcement, ConfidenceField, SignEvent, SignInterpreter, SignPolicy, SignReport,
    SignType, SpeedLimit,
};
pub use speed::{SpeedAssessment, SpeedMonitor, SpeedReport};
pub use telemetry::{SpeedSample, VehicleTelemetry};
pub use units::{DisplayUnit, Units};
pub use visual::VisualRequest;

use alerting::TimestampMs;
use thiserror::Error;

/// ADAS error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdasError {
    #[error("Invalid speed sample: {0} m/s")]
    InvalidSpeed(f32),

    #[error("Sample at {current} ms is older than held sample at {previous} ms")]
    NonMonotonicTimestamp {
        previous: TimestampMs,
        current: TimestampMs,
    },
}
