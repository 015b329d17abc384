//! Camera visibility filtering

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::place::{GeoCoordinate, PointOfInterest};
use crate::PoiConfig;

/// Coordinate in camera world space (meters). `x` points forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Geo to world projection, provided by the perception service
pub trait WorldProjector {
    /// `None` when the point cannot be projected
    fn geo_to_world(&self, coordinate: GeoCoordinate) -> Option<WorldCoordinate>;

    /// Vehicle position accepted by the session. Called before projecting
    /// the POIs of the same update.
    fn vehicle_moved(&mut self, _location: GeoCoordinate) {}
}

/// A POI in front of the camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisiblePoi {
    pub poi: PointOfInterest,
    pub world: WorldCoordinate,
}

impl VisiblePoi {
    pub fn forward_distance(&self) -> f64 {
        self.world.x
    }
}

/// Keeps POIs that are ahead and closer than the visibility distance
pub struct VisibilityFilter {
    max_distance_m: f64,
}

impl VisibilityFilter {
    pub fn new(config: &PoiConfig) -> Self {
        Self {
            max_distance_m: config.visibility_distance_m,
        }
    }

    pub fn is_visible(&self, forward_distance: f64) -> bool {
        forward_distance > 0.0 && forward_distance < self.max_distance_m
    }

    /// Visible subset, nearest first. Empty until the camera is calibrated.
    pub fn visible<P: WorldProjector + ?Sized>(
        &self,
        calibrated: bool,
        candidates: Vec<PointOfInterest>,
        projector: &P,
    ) -> Vec<VisiblePoi> {
        if !calibrated {
            trace!("Camera not calibrated, no POIs visible");
            return Vec::new();
        }

        let mut visible: Vec<VisiblePoi> = candidates
            .into_iter()
            .filter_map(|poi| {
                let world = projector.geo_to_world(poi.coordinate)?;
                self.is_visible(world.x).then_some(VisiblePoi { poi, world })
            })
            .collect();

        visible.sort_by(|a, b| a.forward_distance().total_cmp(&b.forward_distance()));
        visible
    }
}
