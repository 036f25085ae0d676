//! Great-circle offset computation and map marker placement.
//!
//! Technician coordinates are not returned by the scoring collaborator,
//! so candidate markers are synthesized around the intervention target:
//! each one is placed a fixed bearing and distance away using the
//! spherical forward geodesic. Placement is illustrative only.
//!
//! # Reference
//! Veness, "Calculate distance, bearing and more between
//! Latitude/Longitude points" (destination point given distance and
//! bearing from start point).

mod layer;
mod layout;

pub use layer::{MarkerLayer, MarkerSink};
pub use layout::{
    candidate_layout, placeholder_layout, plan_markers, Marker, MarkerKind, MarkerSet,
    CANDIDATE_BASE_BEARING_DEG, DEFAULT_CANDIDATE_DISTANCE_KM, MIN_CANDIDATE_DISTANCE_KM,
};

use crate::models::GeoPoint;

/// Mean Earth radius used by the spherical model (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the point `distance_km` away from `origin` along `bearing_deg`.
///
/// # Algorithm
/// With φ latitude, λ longitude, θ bearing and δ = d / R:
/// ```text
/// φ2 = asin(sin φ1 · cos δ + cos φ1 · sin δ · cos θ)
/// λ2 = λ1 + atan2(sin θ · sin δ · cos φ1, cos δ − sin φ1 · sin φ2)
/// ```
///
/// # Guarantees
/// Latitude is in `-90..=90` and longitude in `-180..180`. The bearing is
/// any real (taken mod 360). Non-finite input yields unspecified output;
/// callers validate upstream.
pub fn offset(origin: GeoPoint, distance_km: f64, bearing_deg: f64) -> GeoPoint {
    let lat1 = origin.latitude.to_radians();
    let lng1 = origin.longitude.to_radians();
    let bearing = bearing_deg.to_radians();
    let angular = distance_km / EARTH_RADIUS_KM;

    let sin_lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos())
        .clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let lng2 = lng1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * sin_lat2);

    GeoPoint::new(
        lat2.to_degrees().clamp(-90.0, 90.0),
        normalize_longitude(lng2.to_degrees()),
    )
}

/// Wraps a longitude in degrees into `-180..180`.
///
/// Equivalent to `((lng + 540) mod 360) - 180` with a Euclidean modulo.
pub fn normalize_longitude(lng_deg: f64) -> f64 {
    let wrapped = (lng_deg + 540.0).rem_euclid(360.0) - 180.0;
    // rem_euclid may round up to exactly 360 for tiny negative inputs.
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
