use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Mean Earth radius used by the spherical approximation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a point after checking both coordinates are finite and in range.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        check_coordinate("latitude", latitude, MIN_LATITUDE, MAX_LATITUDE)?;
        check_coordinate("longitude", longitude, MIN_LONGITUDE, MAX_LONGITUDE)?;
        Ok(Self::new(latitude, longitude))
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_km(*self, *other)
    }
}

fn check_coordinate(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::NonFiniteCoordinate { field });
    }
    if !(min..=max).contains(&value) {
        return Err(DomainError::CoordinateOutOfRange { field, min, max });
    }
    Ok(())
}

/// Great-circle distance between two points in kilometers (haversine).
///
/// No range checking happens here: out-of-range coordinates yield a number,
/// just not a meaningful one. The `min(1.0)` keeps rounding error from pushing
/// the `asin` argument past its domain for antipodal points.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
