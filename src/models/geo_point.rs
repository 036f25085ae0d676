//! Geographic coordinate.

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in decimal degrees (WGS84 order: lat, lng).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north (-90..=90).
    pub latitude: f64,
    /// Longitude in degrees, positive east (-180..=180).
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point. Range checks live in `validation::validate_point`.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are finite and inside their ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}
