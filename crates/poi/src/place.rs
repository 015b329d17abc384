//! Places and the POI set

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::PoiError;

/// Glyph of the synthetic destination POI
pub const DESTINATION_GLYPH: &str = "destination";
/// Glyph of a place with no recognized category
pub const PLACE_GLYPH: &str = "place";

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lon: f64,
    pub lat: f64,
}

impl GeoCoordinate {
    pub fn new(lon: f64, lat: f64) -> Result<Self, PoiError> {
        let coordinate = Self { lon, lat };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Check the coordinate is finite and within WGS84 bounds
    pub fn validate(&self) -> Result<(), PoiError> {
        let in_range = self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat);
        if in_range {
            Ok(())
        } else {
            Err(PoiError::InvalidCoordinate {
                lon: self.lon,
                lat: self.lat,
            })
        }
    }

    fn key(&self) -> (u64, u64) {
        (self.lon.to_bits(), self.lat.to_bits())
    }
}

/// Place returned by the geolocation search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Search provider identifier
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub coordinate: GeoCoordinate,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Resolved navigation destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub coordinate: GeoCoordinate,
    pub name: String,
    /// Formatted street address, once geocoding resolved one
    #[serde(default)]
    pub address: Option<String>,
}

/// Point of interest ready for visibility filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub coordinate: GeoCoordinate,
    /// Recognized category, `None` for the destination
    pub category: Option<String>,
    pub glyph: String,
    pub label: String,
    /// Search provider identifier of the place
    pub place_id: Option<String>,
}

impl PointOfInterest {
    /// POI for a place, glyph taken from the first recognized category
    pub fn from_place(place: Place, categories: &[String]) -> Self {
        let category = place
            .categories
            .iter()
            .find(|c| categories.contains(c))
            .cloned();
        let glyph = category.clone().unwrap_or_else(|| PLACE_GLYPH.to_string());

        Self {
            coordinate: place.coordinate,
            category,
            glyph,
            label: place.name,
            place_id: place.id,
        }
    }

    fn from_destination(destination: &Destination) -> Self {
        Self {
            coordinate: destination.coordinate,
            category: None,
            glyph: DESTINATION_GLYPH.to_string(),
            label: destination.name.clone(),
            place_id: None,
        }
    }
}

/// Nearby places keyed by coordinate, plus the destination marker
#[derive(Debug, Clone, Default)]
pub struct PoiSet {
    places: HashMap<(u64, u64), PointOfInterest>,
    destination: Option<Destination>,
}

impl PoiSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the place set wholesale with a search result.
    ///
    /// An empty result keeps the held set. Places with invalid coordinates
    /// are skipped. Returns the number of places held afterwards.
    pub fn replace_places(&mut self, places: Vec<Place>, categories: &[String]) -> usize {
        if places.is_empty() {
            debug!("Empty place search result, keeping {} places", self.places.len());
            return self.places.len();
        }

        self.places.clear();
        for place in places {
            if let Err(e) = place.coordinate.validate() {
                warn!("Skipping place {}: {}", place.name, e);
                continue;
            }
            let poi = PointOfInterest::from_place(place, categories);
            self.places.insert(poi.coordinate.key(), poi);
        }
        self.places.len()
    }

    pub fn set_destination(&mut self, destination: Destination) {
        self.destination = Some(destination);
    }

    pub fn clear_destination(&mut self) {
        self.destination = None;
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    /// Places plus the destination marker once its address is resolved.
    /// The destination replaces a place at the same coordinate.
    pub fn candidates(&self) -> Vec<PointOfInterest> {
        let marker = self
            .destination
            .as_ref()
            .filter(|d| d.address.is_some())
            .map(PointOfInterest::from_destination);

        let mut out: Vec<PointOfInterest> = self
            .places
            .values()
            .filter(|p| marker.as_ref().map_or(true, |m| m.coordinate.key() != p.coordinate.key()))
            .cloned()
            .collect();
        out.extend(marker);
        out
    }
}
