//! Points of Interest
//!
//! Keeps the set of nearby places and the destination marker, and selects
//! the ones the camera can see. Projection to screen space happens elsewhere.

mod config;
mod filter;
mod place;

pub use config::PoiConfig;
pub use filter::{VisibilityFilter, VisiblePoi, WorldCoordinate, WorldProjector};
pub use place::{Destination, GeoCoordinate, Place, PoiSet, PointOfInterest, DESTINATION_GLYPH, PLACE_GLYPH};

use thiserror::Error;

/// POI error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoiError {
    #[error("Invalid coordinate: lon {lon}, lat {lat}")]
    InvalidCoordinate { lon: f64, lat: f64 },
}
