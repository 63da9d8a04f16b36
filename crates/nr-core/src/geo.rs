//! Geographic coordinate type and great-circle distance.
//!
//! Distances use a spherical Earth.  At urban scale the error against the
//! WGS-84 ellipsoid stays well under 0.5 %, which is all a straight-line
//! "which one is closest" comparison needs.

/// Mean Earth radius in kilometres used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate in degrees.
///
/// No range validation is performed: out-of-range values produce a
/// meaningless (but finite) distance, and non-finite values produce `NaN`.
/// Callers that accept coordinates from the outside should check
/// [`is_finite`](Self::is_finite) first.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` when both components are finite numbers.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Symmetric, non-negative, and exactly `0.0` for identical points.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = to_radians(other.lat - self.lat);
        let d_lon = to_radians(other.lon - self.lon);

        let lat1 = to_radians(self.lat);
        let lat2 = to_radians(other.lat);

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // Rounding can push `a` a hair past 1.0 for antipodal points.
        let a = a.min(1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Haversine distance in kilometres between two raw `(lat, lng)` pairs.
#[inline]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    GeoPoint::new(lat1, lng1).distance_km(GeoPoint::new(lat2, lng2))
}

#[inline]
fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}
