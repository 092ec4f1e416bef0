//! Planar coordinate types
//!
//! Distances are Euclidean in raw coordinate space, not geodesic: every
//! animation marches in the same units its path was authored in, so the
//! easing math and the path lengths always agree.

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Euclidean distance to `other` in coordinate units.
    pub fn distance_to(&self, other: LngLat) -> f64 {
        let d_lng = other.lng - self.lng;
        let d_lat = other.lat - self.lat;
        (d_lng * d_lng + d_lat * d_lat).sqrt()
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<(f64, f64)> for LngLat {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self::new(lng, lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_planar_hypotenuse() {
        let a = LngLat::new(0.0, 0.0);
        let b = LngLat::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = LngLat::new(-75.7, 45.4);
        let b = LngLat::new(-75.6, 45.5);
        assert!((a.distance_to(b) - b.distance_to(a)).abs() < 1e-12);
    }

    #[test]
    fn roundtrips_through_json() {
        let p = LngLat::new(-75.6975406016469, 45.411484269277736);
        let json = serde_json::to_string(&p).unwrap();
        let back: LngLat = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
