//! Geographic coordinates and great-circle distance.

use crate::error::LocationError;
use serde::Serialize;
use std::str::FromStr;

/// Mean Earth radius in kilometres used by every distance computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A validated (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange(latitude));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self { latitude, longitude })
    }

    #[inline]
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres.
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_km(self, other)
    }
}

/// Parses the `"<latitude>,<longitude>"` form used in query strings.
impl FromStr for Coordinate {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LocationError::Malformed(s.to_string());

        let (lat, lng) = s.split_once(',').ok_or_else(malformed)?;
        let (lat, lng) = (lat.trim(), lng.trim());
        if lat.is_empty() || lng.is_empty() {
            return Err(malformed());
        }

        let latitude: f64 = lat.parse().map_err(|_| malformed())?;
        let longitude: f64 = lng.parse().map_err(|_| malformed())?;
        Coordinate::new(latitude, longitude)
    }
}

/// Haversine great-circle distance between two coordinates, in kilometres.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h slightly past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert_eq!(
            Coordinate::new(200.0, 0.0),
            Err(LocationError::LatitudeOutOfRange(200.0))
        );
        assert_eq!(
            Coordinate::new(0.0, -180.5),
            Err(LocationError::LongitudeOutOfRange(-180.5))
        );
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_parse_query_form() {
        let c: Coordinate = "46.7110, -63.1150".parse().unwrap();
        assert_eq!(c.latitude(), 46.711);
        assert_eq!(c.longitude(), -63.115);

        assert!(matches!("46.7".parse::<Coordinate>(), Err(LocationError::Malformed(_))));
        assert!(matches!(",1".parse::<Coordinate>(), Err(LocationError::Malformed(_))));
        assert!(matches!("a,b".parse::<Coordinate>(), Err(LocationError::Malformed(_))));
        assert!(matches!(
            "200,0".parse::<Coordinate>(),
            Err(LocationError::LatitudeOutOfRange(_))
        ));
    }

    #[test]
    fn test_haversine_same_point_is_zero() {
        let c = Coordinate::new(32.109333, 34.855499).unwrap();
        assert_eq!(haversine_km(&c, &c), 0.0);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = Coordinate::new(40.7128, -74.0060).unwrap();
        let b = Coordinate::new(51.5074, -0.1278).unwrap();
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-9);
    }

    #[test]
    fn test_haversine_known_distance() {
        // New York to London, roughly 5570 km.
        let a = Coordinate::new(40.7128, -74.0060).unwrap();
        let b = Coordinate::new(51.5074, -0.1278).unwrap();
        let d = a.distance_to(&b);
        assert!((d - 5570.0).abs() < 50.0, "got {}", d);
    }

    #[test]
    fn test_haversine_antipodal_is_finite() {
        let a = Coordinate::new(0.0, 0.0).unwrap();
        let b = Coordinate::new(0.0, 180.0).unwrap();
        let d = haversine_km(&a, &b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
