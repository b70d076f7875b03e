//! Validated WGS84 coordinate pair.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Coordinates`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoordinatesError {
    /// Longitude is not a finite number or outside [-180, 180].
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    /// Latitude is not a finite number or outside [-90, 90].
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
}

/// A WGS84 point location (SRID 4326).
///
/// Longitude comes first, matching the `(x, y)` axis order PostGIS uses
/// for `ST_MakePoint(longitude, latitude)`.
///
/// ## Constraints
///
/// - Longitude: finite, within [-180, 180]
/// - Latitude: finite, within [-90, 90]
///
/// ## Examples
///
/// ```
/// use storemap_core::Coordinates;
///
/// assert!(Coordinates::new(104.9113, 21.7168).is_ok());
/// assert!(Coordinates::new(200.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, 91.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    /// Create a validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is non-finite or outside the
    /// valid WGS84 range.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, CoordinatesError> {
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::LongitudeOutOfRange(longitude));
        }
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::LatitudeOutOfRange(latitude));
        }

        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Longitude (x) in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude (y) in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let c = Coordinates::new(104.9113, 21.7168).unwrap();
        assert_eq!(c.longitude(), 104.9113);
        assert_eq!(c.latitude(), 21.7168);
    }

    #[test]
    fn test_boundary_values() {
        assert!(Coordinates::new(-180.0, -90.0).is_ok());
        assert!(Coordinates::new(180.0, 90.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert!(matches!(
            Coordinates::new(180.1, 0.0),
            Err(CoordinatesError::LongitudeOutOfRange(_))
        ));
        assert!(matches!(
            Coordinates::new(-200.0, 0.0),
            Err(CoordinatesError::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert!(matches!(
            Coordinates::new(0.0, 90.5),
            Err(CoordinatesError::LatitudeOutOfRange(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }
}
