//! Inbound frames and outbound actions

use serde::{Deserialize, Serialize};

use adas::{CollisionObject, SignEvent, Units, VisualRequest};
use alerting::{AlertRequest, MessageKey, TimestampMs};
use poi::{Destination, GeoCoordinate, Place, VisiblePoi};

/// One timestamped event from a collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp_ms: TimestampMs,
    #[serde(flatten)]
    pub event: FrameEvent,
}

impl Frame {
    pub fn new(timestamp_ms: TimestampMs, event: FrameEvent) -> Self {
        Self {
            timestamp_ms,
            event,
        }
    }
}

/// Inbound event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameEvent {
    /// Camera calibration state changed
    CameraUpdated { calibrated: bool },

    /// New vehicle speed and position
    VehicleState {
        speed_mps: f32,
        #[serde(default)]
        location: Option<GeoCoordinate>,
    },

    /// Signs classified in one perception frame
    SignsClassified { signs: Vec<SignEvent> },

    /// Collision set of one perception frame
    CollisionsUpdated { objects: Vec<CollisionObject> },

    /// Perception finished a frame
    FrameCompleted,

    /// Nearby place search returned
    PlacesFound { places: Vec<Place> },

    /// Nearby place search failed
    PlacesSearchFailed { reason: String },

    /// Destination search resolved
    DestinationResolved { destination: Destination },

    /// Destination search found nothing
    DestinationNotFound,

    /// User changed the unit preference
    UnitsChanged { units: Units },
}

/// Side effect requested from a collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OutboundAction {
    /// Speak an alert
    Speak(AlertRequest),

    /// Update an overlay element
    Visual(VisualRequest),

    /// Search for places around the vehicle
    RefreshPlaces {
        near: GeoCoordinate,
        radius_m: u32,
        limit: u32,
        categories: Vec<String>,
    },

    /// Redraw POI markers; replaces all previous markers
    ShowPointsOfInterest { pois: Vec<VisiblePoi> },

    /// Show the "could not understand" destination card
    DestinationUnresolved { title: MessageKey, address: MessageKey },
}
