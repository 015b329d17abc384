//! Geo to world projection for recorded drives

use poi::{GeoCoordinate, WorldCoordinate, WorldProjector};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Movement needed before the course is updated (meters)
const MIN_COURSE_MOVE_M: f64 = 0.5;

/// Projects around the last vehicle position, facing the course over ground.
///
/// Uses an equirectangular approximation, accurate over the few hundred
/// meters a POI can be visible at. Nothing projects until the vehicle has
/// moved far enough to establish a course.
#[derive(Debug, Clone, Default)]
pub struct CourseProjector {
    position: Option<GeoCoordinate>,
    /// Clockwise from north
    heading_rad: Option<f64>,
}

impl CourseProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vehicle position the session accepted
    pub fn observe(&mut self, location: GeoCoordinate) {
        if let Some(previous) = self.position {
            let (east, north) = local_offset(previous, location);
            if east.hypot(north) < MIN_COURSE_MOVE_M {
                return;
            }
            self.heading_rad = Some(east.atan2(north));
        }
        self.position = Some(location);
    }

    pub fn heading_deg(&self) -> Option<f64> {
        self.heading_rad.map(f64::to_degrees)
    }
}

impl WorldProjector for CourseProjector {
    fn vehicle_moved(&mut self, location: GeoCoordinate) {
        self.observe(location);
    }

    fn geo_to_world(&self, coordinate: GeoCoordinate) -> Option<WorldCoordinate> {
        let origin = self.position?;
        let heading = self.heading_rad?;
        let (east, north) = local_offset(origin, coordinate);
        let (sin_h, cos_h) = heading.sin_cos();

        Some(WorldCoordinate {
            x: north * cos_h + east * sin_h,
            y: north * sin_h - east * cos_h,
            z: 0.0,
        })
    }
}

/// (east, north) meters from `origin` to `target`
fn local_offset(origin: GeoCoordinate, target: GeoCoordinate) -> (f64, f64) {
    let north = (target.lat - origin.lat).to_radians() * EARTH_RADIUS_M;
    let east = (target.lon - origin.lon).to_radians() * EARTH_RADIUS_M * origin.lat.to_radians().cos();
    (east, north)
}
