//! Event Fusion Engine
//!
//! Correlates data from multiple sources:
//! - Perception (camera calibration, traffic signs, collisions)
//! - Telemetry (vehicle speed and position)
//! - Geolocation (nearby places, destination)
//!
//! Each incoming [`Frame`] is processed synchronously against one explicit
//! [`SessionState`] and yields the side effects to perform as
//! [`OutboundAction`]s. The engine performs no I/O itself.

mod config;
mod engine;
mod event;
mod state;

pub use config::FusionConfig;
pub use engine::DriveAssist;
pub use event::{Frame, FrameEvent, OutboundAction};
pub use state::SessionState;

use thiserror::Error;

/// Fusion error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FusionError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
