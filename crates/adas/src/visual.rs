//! Visual state requests for the UI overlay

use serde::{Deserialize, Serialize};

use crate::speed::SpeedAssessment;
use crate::units::DisplayUnit;

/// Request to change one overlay element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum VisualRequest {
    /// Speed and limit panels
    SpeedReadout {
        speed: u32,
        limit: u32,
        unit: DisplayUnit,
    },

    /// Reveal the speed and limit panels
    SpeedLimitVisible,

    /// Tint behind the speed readout, `None` is transparent
    OverspeedTint { intensity: Option<f32> },

    /// Persistent "slow down" banner for critical collisions
    SlowDownIndicator { active: bool },

    /// Vehicle reads 0 mph
    VehicleStationary { stationary: bool },
}

impl VisualRequest {
    /// Readout and tint requests for an assessment
    pub fn from_assessment(assessment: &SpeedAssessment) -> [VisualRequest; 2] {
        [
            VisualRequest::SpeedReadout {
                speed: assessment.display_speed,
                limit: assessment.display_limit,
                unit: assessment.unit,
            },
            VisualRequest::OverspeedTint {
                intensity: assessment.intensity,
            },
        ]
    }
}
